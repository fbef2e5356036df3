use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::settings::dtos::{PublicSettingsDto, SettingResponseDto, UpdateSettingDto};
use crate::features::settings::services::SettingsService;
use crate::shared::types::ApiResponse;

/// Public site settings (logo and title)
#[utoipa::path(
    get,
    path = "/api/settings/public",
    responses(
        (status = 200, description = "Public settings", body = ApiResponse<PublicSettingsDto>)
    ),
    tag = "settings"
)]
pub async fn get_public_settings(
    State(service): State<Arc<SettingsService>>,
) -> Result<Json<ApiResponse<PublicSettingsDto>>> {
    let settings = service.public().await?;
    Ok(Json(ApiResponse::success(Some(settings), None, None)))
}

/// List all settings
#[utoipa::path(
    get,
    path = "/api/admin/settings",
    responses(
        (status = 200, description = "All settings", body = ApiResponse<Vec<SettingResponseDto>>)
    ),
    tag = "settings",
    security(("bearer_auth" = []))
)]
pub async fn list_settings(
    State(service): State<Arc<SettingsService>>,
) -> Result<Json<ApiResponse<Vec<SettingResponseDto>>>> {
    let settings = service.list().await?;
    Ok(Json(ApiResponse::success(Some(settings), None, None)))
}

/// Create or replace a setting
#[utoipa::path(
    put,
    path = "/api/admin/settings/{key}",
    params(("key" = String, Path, description = "Setting key, e.g. `landing_markdown`")),
    request_body = UpdateSettingDto,
    responses(
        (status = 200, description = "Setting saved", body = ApiResponse<SettingResponseDto>),
        (status = 400, description = "Invalid key or value")
    ),
    tag = "settings",
    security(("bearer_auth" = []))
)]
pub async fn update_setting(
    State(service): State<Arc<SettingsService>>,
    Path(key): Path<String>,
    AppJson(dto): AppJson<UpdateSettingDto>,
) -> Result<Json<ApiResponse<SettingResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let setting = service.upsert(&key, &dto.value).await?;
    Ok(Json(ApiResponse::success(
        Some(setting),
        Some("Setting saved".to_string()),
        None,
    )))
}

/// Remove a setting
#[utoipa::path(
    delete,
    path = "/api/admin/settings/{key}",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting deleted"),
        (status = 404, description = "Setting not found")
    ),
    tag = "settings",
    security(("bearer_auth" = []))
)]
pub async fn delete_setting(
    State(service): State<Arc<SettingsService>>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&key).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Setting deleted".to_string()),
        None,
    )))
}
