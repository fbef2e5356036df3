//! Admin authentication.
//!
//! Admins log in with username and password (bcrypt verified) and receive a
//! signed HS256 session token. The token is accepted either as a bearer token
//! or through the `session` cookie set on login.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | No | Exchange credentials for a session token |
//! | POST | `/api/auth/logout` | No | Clear the session cookie |
//! | GET | `/api/auth/me` | Yes | Current admin |

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";
