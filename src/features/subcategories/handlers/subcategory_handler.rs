use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::navigation::models::FlatSubcategory;
use crate::features::subcategories::dtos::{SubcategoryRequestDto, SubcategoryResponseDto};
use crate::features::subcategories::services::SubcategoryService;
use crate::shared::types::{ApiResponse, Meta};

fn with_total<T>(items: Vec<T>) -> Json<ApiResponse<Vec<T>>> {
    let total = items.len() as i64;
    Json(ApiResponse::success(Some(items), None, Some(Meta { total })))
}

/// List every subcategory across all categories
#[utoipa::path(
    get,
    path = "/api/admin/subcategories",
    responses(
        (status = 200, description = "List of subcategories", body = ApiResponse<Vec<SubcategoryResponseDto>>),
    ),
    tag = "subcategories",
    security(("bearer_auth" = []))
)]
pub async fn list_subcategories(
    State(service): State<Arc<SubcategoryService>>,
) -> Result<Json<ApiResponse<Vec<SubcategoryResponseDto>>>> {
    Ok(with_total(service.list_all().await?))
}

/// List the top-level subcategories of a category
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}/subcategories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Top-level subcategories", body = ApiResponse<Vec<SubcategoryResponseDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "subcategories",
    security(("bearer_auth" = []))
)]
pub async fn list_root_by_category(
    State(service): State<Arc<SubcategoryService>>,
    Path(category_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<SubcategoryResponseDto>>>> {
    Ok(with_total(service.list_root_by_category(category_id).await?))
}

/// List all subcategories of a category as an indented pre-order list
///
/// Intended for parent pickers; hidden subcategories are included.
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}/subcategories/flat",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Flattened subcategories", body = ApiResponse<Vec<FlatSubcategory>>),
        (status = 404, description = "Category not found")
    ),
    tag = "subcategories",
    security(("bearer_auth" = []))
)]
pub async fn list_flat_by_category(
    State(service): State<Arc<SubcategoryService>>,
    Path(category_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<FlatSubcategory>>>> {
    Ok(with_total(service.list_flat(category_id).await?))
}

/// List the direct children of a subcategory
#[utoipa::path(
    get,
    path = "/api/admin/subcategories/{id}/children",
    params(("id" = i64, Path, description = "Parent subcategory ID")),
    responses(
        (status = 200, description = "Child subcategories", body = ApiResponse<Vec<SubcategoryResponseDto>>),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "subcategories",
    security(("bearer_auth" = []))
)]
pub async fn list_children(
    State(service): State<Arc<SubcategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<SubcategoryResponseDto>>>> {
    Ok(with_total(service.list_children(id).await?))
}

/// Get subcategory by id
#[utoipa::path(
    get,
    path = "/api/admin/subcategories/{id}",
    params(("id" = i64, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Subcategory found", body = ApiResponse<SubcategoryResponseDto>),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "subcategories",
    security(("bearer_auth" = []))
)]
pub async fn get_subcategory(
    State(service): State<Arc<SubcategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SubcategoryResponseDto>>> {
    let subcategory = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(
        Some(subcategory.into()),
        None,
        None,
    )))
}

/// Create a subcategory
#[utoipa::path(
    post,
    path = "/api/admin/subcategories",
    request_body = SubcategoryRequestDto,
    responses(
        (status = 200, description = "Subcategory created", body = ApiResponse<SubcategoryResponseDto>),
        (status = 400, description = "Validation error or parent in another category"),
        (status = 404, description = "Category or parent not found"),
        (status = 409, description = "Slug already used in this category")
    ),
    tag = "subcategories",
    security(("bearer_auth" = []))
)]
pub async fn create_subcategory(
    State(service): State<Arc<SubcategoryService>>,
    AppJson(dto): AppJson<SubcategoryRequestDto>,
) -> Result<Json<ApiResponse<SubcategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let subcategory = service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(subcategory),
        Some("Subcategory created".to_string()),
        None,
    )))
}

/// Update a subcategory
#[utoipa::path(
    put,
    path = "/api/admin/subcategories/{id}",
    params(("id" = i64, Path, description = "Subcategory ID")),
    request_body = SubcategoryRequestDto,
    responses(
        (status = 200, description = "Subcategory updated", body = ApiResponse<SubcategoryResponseDto>),
        (status = 400, description = "Validation error, cycle or parent in another category"),
        (status = 404, description = "Subcategory, category or parent not found"),
        (status = 409, description = "Slug already used in this category")
    ),
    tag = "subcategories",
    security(("bearer_auth" = []))
)]
pub async fn update_subcategory(
    State(service): State<Arc<SubcategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SubcategoryRequestDto>,
) -> Result<Json<ApiResponse<SubcategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let subcategory = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(subcategory),
        Some("Subcategory updated".to_string()),
        None,
    )))
}

/// Delete a subcategory with its nested subcategories and documents
#[utoipa::path(
    delete,
    path = "/api/admin/subcategories/{id}",
    params(("id" = i64, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Subcategory deleted"),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "subcategories",
    security(("bearer_auth" = []))
)]
pub async fn delete_subcategory(
    State(service): State<Arc<SubcategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Subcategory deleted".to_string()),
        None,
    )))
}
