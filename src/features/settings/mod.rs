//! Site settings stored as key/value pairs.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/settings/public` | No | Logo and site title |
//! | GET | `/api/admin/settings` | Yes | List all settings |
//! | PUT | `/api/admin/settings/{key}` | Yes | Create or replace a setting |
//! | DELETE | `/api/admin/settings/{key}` | Yes | Remove a setting |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SettingsService;
