use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Landing page payload
///
/// `redirect` points at the first published guide; `html` is only filled in
/// when there is nothing to redirect to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LandingResponseDto {
    pub redirect: Option<String>,
    pub html: Option<String>,
}
