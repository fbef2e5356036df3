use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::navigation::dtos::LandingResponseDto;
use crate::features::navigation::models::CategoryNode;
use crate::features::navigation::services::{LandingService, StructureLoader};
use crate::shared::types::ApiResponse;

/// Public navigation structure
///
/// Visible categories with their visible subcategory trees and published
/// guides. An unavailable database yields an empty list.
#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "Navigation structure", body = ApiResponse<Vec<CategoryNode>>)
    ),
    tag = "navigation"
)]
pub async fn get_navigation(
    State(loader): State<Arc<StructureLoader>>,
) -> Json<ApiResponse<Vec<CategoryNode>>> {
    let structure = loader.load().await;
    Json(ApiResponse::success(Some(structure), None, None))
}

/// Landing page: redirect target or rendered landing Markdown
#[utoipa::path(
    get,
    path = "/api/landing",
    responses(
        (status = 200, description = "Landing page", body = ApiResponse<LandingResponseDto>)
    ),
    tag = "navigation"
)]
pub async fn get_landing(
    State(service): State<Arc<LandingService>>,
) -> Json<ApiResponse<LandingResponseDto>> {
    Json(ApiResponse::success(Some(service.landing().await), None, None))
}

/// Full structure for the admin panel, hidden nodes and drafts included
#[utoipa::path(
    get,
    path = "/api/admin/structure",
    responses(
        (status = 200, description = "Admin structure", body = ApiResponse<Vec<CategoryNode>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "navigation",
    security(("bearer_auth" = []))
)]
pub async fn get_admin_structure(
    State(loader): State<Arc<StructureLoader>>,
) -> Result<Json<ApiResponse<Vec<CategoryNode>>>> {
    let structure = loader.load_admin().await?;
    Ok(Json(ApiResponse::success(Some(structure), None, None)))
}
