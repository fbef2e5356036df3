use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::search::models::{SearchQuery, SearchResult};
use crate::features::search::services::SearchService;

/// Search published documents
///
/// Returns a bare JSON array (no response envelope) of at most 20 results.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching documents", body = Vec<SearchResult>)
    ),
    tag = "search"
)]
pub async fn search(
    State(service): State<Arc<SearchService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>> {
    let results = service.search(query.q.as_deref()).await?;
    Ok(Json(results))
}
