//! Admin user management.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/users` | Yes | List admins |
//! | POST | `/api/admin/users` | Yes | Create admin |
//! | PUT | `/api/admin/users/{id}` | Yes | Update admin (password optional) |
//! | DELETE | `/api/admin/users/{id}` | Yes | Delete admin (not yourself) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
