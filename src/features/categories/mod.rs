//! Top-level documentation categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/categories` | Yes | List categories (hidden included) |
//! | POST | `/api/admin/categories` | Yes | Create category |
//! | GET | `/api/admin/categories/{id}` | Yes | Get category |
//! | PUT | `/api/admin/categories/{id}` | Yes | Update category |
//! | DELETE | `/api/admin/categories/{id}` | Yes | Delete category with its subtree |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
