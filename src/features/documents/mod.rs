//! Markdown documents.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/docs/{category}/{subcategory}/{document}` | No | Published document with rendered HTML |
//! | GET | `/api/admin/documents` | Yes | List documents (optionally per subcategory) |
//! | POST | `/api/admin/documents` | Yes | Create document |
//! | GET | `/api/admin/documents/{id}` | Yes | Get document |
//! | PUT | `/api/admin/documents/{id}` | Yes | Update or move document |
//! | DELETE | `/api/admin/documents/{id}` | Yes | Delete document |
//! | GET | `/api/admin/documents/{id}/content` | Yes | Raw Markdown for in-place editing |
//! | POST | `/api/admin/documents/{id}/quick-edit` | Yes | Replace Markdown only |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DocumentService;
