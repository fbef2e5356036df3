//! Navigation structure assembly.
//!
//! The structure is rebuilt from the database on every request: visible
//! categories, their nested visible subcategories and published guides.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/navigation` | No | Public structure |
//! | GET | `/api/landing` | No | Redirect to the first guide or landing HTML |
//! | GET | `/api/admin/structure` | Yes | Full structure with hidden nodes and drafts |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;

pub use services::{LandingService, StructureLoader};
pub use tree::{HiddenPolicy, TreeError};
