use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::documents::dtos::{
    CreateDocumentDto, DocumentContentDto, DocumentListItemDto, DocumentResponseDto,
    DocumentSummaryDto, ListDocumentsQuery, PublicDocumentDto, QuickEditDto, UpdateDocumentDto,
};
use crate::features::documents::services::DocumentService;
use crate::shared::types::{ApiResponse, Meta};

/// Get a published document by its slug path
///
/// The Markdown body is rendered to HTML in the `html` field.
#[utoipa::path(
    get,
    path = "/api/docs/{category}/{subcategory}/{document}",
    params(
        ("category" = String, Path, description = "Category slug"),
        ("subcategory" = String, Path, description = "Subcategory slug"),
        ("document" = String, Path, description = "Document slug")
    ),
    responses(
        (status = 200, description = "Document found", body = ApiResponse<PublicDocumentDto>),
        (status = 404, description = "Document not found or not published")
    ),
    tag = "documents"
)]
pub async fn get_published_document(
    State(service): State<Arc<DocumentService>>,
    Path((category, subcategory, document)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<PublicDocumentDto>>> {
    let document = service
        .get_published_by_slugs(&category, &subcategory, &document)
        .await?;
    Ok(Json(ApiResponse::success(Some(document), None, None)))
}

/// List documents, drafts included
#[utoipa::path(
    get,
    path = "/api/admin/documents",
    params(ListDocumentsQuery),
    responses(
        (status = 200, description = "List of documents", body = ApiResponse<Vec<DocumentListItemDto>>),
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn list_documents(
    State(service): State<Arc<DocumentService>>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<ApiResponse<Vec<DocumentListItemDto>>>> {
    let documents = service.list(query.subcategory_id).await?;
    let total = documents.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(documents),
        None,
        Some(Meta { total }),
    )))
}

/// List the documents of one subcategory in display order
#[utoipa::path(
    get,
    path = "/api/admin/subcategories/{id}/documents",
    params(("id" = i64, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Documents of the subcategory", body = ApiResponse<Vec<DocumentSummaryDto>>),
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn list_subcategory_documents(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<DocumentSummaryDto>>>> {
    let documents: Vec<DocumentSummaryDto> = service
        .fetch_by_subcategory(id, false)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = documents.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(documents),
        None,
        Some(Meta { total }),
    )))
}

/// Get document by id
#[utoipa::path(
    get,
    path = "/api/admin/documents/{id}",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document found", body = ApiResponse<DocumentResponseDto>),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn get_document(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    let document = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(document.into()), None, None)))
}

/// Get the raw Markdown of a document
#[utoipa::path(
    get,
    path = "/api/admin/documents/{id}/content",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document content", body = ApiResponse<DocumentContentDto>),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn get_document_content(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DocumentContentDto>>> {
    let content = service.get_content(id).await?;
    Ok(Json(ApiResponse::success(Some(content), None, None)))
}

/// Create a document
#[utoipa::path(
    post,
    path = "/api/admin/documents",
    request_body = CreateDocumentDto,
    responses(
        (status = 200, description = "Document created", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Subcategory not found"),
        (status = 409, description = "Slug already used in this subcategory")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn create_document(
    State(service): State<Arc<DocumentService>>,
    AppJson(dto): AppJson<CreateDocumentDto>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let document = service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(document),
        Some("Document created".to_string()),
        None,
    )))
}

/// Update a document
#[utoipa::path(
    put,
    path = "/api/admin/documents/{id}",
    params(("id" = i64, Path, description = "Document ID")),
    request_body = UpdateDocumentDto,
    responses(
        (status = 200, description = "Document updated", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Document or target subcategory not found"),
        (status = 409, description = "Slug already used in the target subcategory")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn update_document(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateDocumentDto>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let document = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(document),
        Some("Document updated".to_string()),
        None,
    )))
}

/// Replace only the Markdown body of a document
#[utoipa::path(
    post,
    path = "/api/admin/documents/{id}/quick-edit",
    params(("id" = i64, Path, description = "Document ID")),
    request_body = QuickEditDto,
    responses(
        (status = 200, description = "Content saved", body = ApiResponse<DocumentResponseDto>),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn quick_edit_document(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<QuickEditDto>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    let document = service.update_content(id, &dto.content).await?;
    Ok(Json(ApiResponse::success(
        Some(document),
        Some("Content saved".to_string()),
        None,
    )))
}

/// Delete a document
#[utoipa::path(
    delete,
    path = "/api/admin/documents/{id}",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document deleted"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn delete_document(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Document deleted".to_string()),
        None,
    )))
}
