use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::documents::handlers;
use crate::features::documents::services::DocumentService;

/// Public document routes
pub fn public_routes(service: Arc<DocumentService>) -> Router {
    Router::new()
        .route(
            "/api/docs/{category}/{subcategory}/{document}",
            get(handlers::get_published_document),
        )
        .with_state(service)
}

/// Admin document routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<DocumentService>) -> Router {
    Router::new()
        .route(
            "/documents",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route(
            "/documents/{id}",
            get(handlers::get_document)
                .put(handlers::update_document)
                .delete(handlers::delete_document),
        )
        .route("/documents/{id}/content", get(handlers::get_document_content))
        .route(
            "/documents/{id}/quick-edit",
            post(handlers::quick_edit_document),
        )
        .route(
            "/subcategories/{id}/documents",
            get(handlers::list_subcategory_documents),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{test_pool, with_admin_auth};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;

    async fn seed_subcategory(pool: &SqlitePool) -> i64 {
        let category_id: i64 = sqlx::query_scalar(
            "INSERT INTO categories (name, display_name, slug) VALUES ('mc', 'Minecraft', 'minecraft') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        sqlx::query_scalar(
            "INSERT INTO subcategories (category_id, name, display_name, slug) VALUES (?, 'setup', 'Setup', 'setup') RETURNING id",
        )
        .bind(category_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_admin_edit_then_public_read() {
        let pool = test_pool().await;
        let subcategory_id = seed_subcategory(&pool).await;
        let service = Arc::new(DocumentService::new(pool));
        let admin = TestServer::new(with_admin_auth(admin_routes(service.clone()))).unwrap();
        let public = TestServer::new(public_routes(service)).unwrap();

        let body: Value = admin
            .post("/documents")
            .json(&json!({
                "subcategory_id": subcategory_id,
                "title": "Install Java",
                "content": "Old"
            }))
            .await
            .json();
        let id = body["data"]["id"].as_i64().unwrap();

        admin
            .post(&format!("/documents/{}/quick-edit", id))
            .json(&json!({ "content": "## Requirements" }))
            .await
            .assert_status_ok();

        let body: Value = admin.get(&format!("/documents/{}/content", id)).await.json();
        assert_eq!(body["data"]["content"], "## Requirements");

        let body: Value = admin
            .get(&format!("/subcategories/{}/documents", subcategory_id))
            .await
            .json();
        assert_eq!(body["meta"]["total"], 1);

        let response = public.get("/api/docs/minecraft/setup/install-java").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["html"], "<h2>Requirements</h2>\n");
        assert_eq!(body["data"]["url"], "/docs/minecraft/setup/install-java");

        public
            .get("/api/docs/minecraft/setup/missing")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_unpublished_document_is_hidden_from_readers() {
        let pool = test_pool().await;
        let subcategory_id = seed_subcategory(&pool).await;
        let service = Arc::new(DocumentService::new(pool));
        let admin = TestServer::new(with_admin_auth(admin_routes(service.clone()))).unwrap();
        let public = TestServer::new(public_routes(service)).unwrap();

        admin
            .post("/documents")
            .json(&json!({
                "subcategory_id": subcategory_id,
                "title": "Draft",
                "content": "wip",
                "is_published": false
            }))
            .await
            .assert_status_ok();

        public
            .get("/api/docs/minecraft/setup/draft")
            .await
            .assert_status_not_found();

        let body: Value = admin.get("/documents").await.json();
        assert_eq!(body["meta"]["total"], 1);
    }
}
