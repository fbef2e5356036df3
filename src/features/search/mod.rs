//! Type-ahead document search.
//!
//! Matching is accent and case insensitive: query and candidate fields are
//! NFD-decomposed, stripped of combining marks and lowercased.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/search?q=` | No | Up to 20 published documents, bare JSON array |

pub mod handlers;
pub mod models;
pub mod ranker;
pub mod routes;
pub mod services;

pub use services::SearchService;
