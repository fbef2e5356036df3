use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::documents::models::SearchCandidate;
use crate::shared::constants::DOCS_URL_PREFIX;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Search term; blank returns no results
    pub q: Option<String>,
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    pub title: String,
    /// Category display name
    pub category: String,
    /// Subcategory display name
    pub subcategory: String,
    pub path: String,
    pub url: String,
}

impl From<SearchCandidate> for SearchResult {
    fn from(c: SearchCandidate) -> Self {
        let url = format!(
            "{}/{}/{}/{}",
            DOCS_URL_PREFIX, c.category_slug, c.subcategory_slug, c.slug
        );
        Self {
            title: c.title,
            category: c.category_name,
            subcategory: c.subcategory_name,
            path: url.clone(),
            url,
        }
    }
}
