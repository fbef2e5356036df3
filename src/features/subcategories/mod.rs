//! Nested subcategories inside a category.
//!
//! A subcategory either sits at the top level of its category or below a
//! parent subcategory of the same category. Slugs are unique per category.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/subcategories` | Yes | List every subcategory |
//! | POST | `/api/admin/subcategories` | Yes | Create subcategory |
//! | GET | `/api/admin/subcategories/{id}` | Yes | Get subcategory |
//! | PUT | `/api/admin/subcategories/{id}` | Yes | Update or move subcategory |
//! | DELETE | `/api/admin/subcategories/{id}` | Yes | Delete subcategory with its subtree |
//! | GET | `/api/admin/subcategories/{id}/children` | Yes | Direct children |
//! | GET | `/api/admin/categories/{id}/subcategories` | Yes | Top level of a category |
//! | GET | `/api/admin/categories/{id}/subcategories/flat` | Yes | Indented pre-order list |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SubcategoryService;
