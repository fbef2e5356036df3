use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Admin identity attached to authenticated requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

/// Claims carried by the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id, stringified as JWT subjects are strings
    pub sub: String,
    pub username: String,
    pub iat: u64,
    pub exp: u64,
}
