use std::sync::Arc;

use crate::core::error::Result;
use crate::features::documents::DocumentService;
use crate::features::search::models::SearchResult;
use crate::features::search::ranker::rank;

pub struct SearchService {
    documents: Arc<DocumentService>,
}

impl SearchService {
    pub fn new(documents: Arc<DocumentService>) -> Self {
        Self { documents }
    }

    /// Search published documents; a blank query never touches the database
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<SearchResult>> {
        let query = query.map(str::trim).unwrap_or_default();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.documents.search_candidates().await?;
        let results = rank(query, candidates);

        tracing::debug!("Search for '{}' returned {} results", query, results.len());

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;

    #[tokio::test]
    async fn test_search_published_documents() {
        let pool = test_pool().await;
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, display_name, slug) VALUES (1, 'mc', 'Minecraft', 'minecraft');
            INSERT INTO subcategories (id, category_id, name, display_name, slug) VALUES (1, 1, 'setup', 'Setup', 'setup');
            INSERT INTO documents (subcategory_id, title, slug, content) VALUES (1, 'Server Setup', 'server-setup', 'x');
            INSERT INTO documents (subcategory_id, title, slug, content, is_published) VALUES (1, 'Server Draft', 'server-draft', 'x', 0);
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        let service = SearchService::new(Arc::new(DocumentService::new(pool)));

        let results = service.search(Some("server")).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "/docs/minecraft/setup/server-setup");
        assert_eq!(results[0].category, "Minecraft");
    }

    #[tokio::test]
    async fn test_blank_query_skips_the_database() {
        let pool = test_pool().await;
        let service = SearchService::new(Arc::new(DocumentService::new(pool.clone())));
        pool.close().await;

        assert!(service.search(None).await.unwrap().is_empty());
        assert!(service.search(Some("  ")).await.unwrap().is_empty());
        assert!(service.search(Some("server")).await.is_err());
    }
}
