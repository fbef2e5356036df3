use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Admin category routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{test_pool, with_admin_auth};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server() -> TestServer {
        let service = Arc::new(CategoryService::new(test_pool().await));
        TestServer::new(with_admin_auth(admin_routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let server = server().await;

        let body: Value = server
            .post("/categories")
            .json(&json!({ "name": "servers", "display_name": "Game Servers" }))
            .await
            .json();
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["slug"], "game-servers");
        assert_eq!(body["data"]["icon"]["type"], "font_awesome");

        server
            .get(&format!("/categories/{}", id))
            .await
            .assert_status_ok();
        server
            .delete(&format!("/categories/{}", id))
            .await
            .assert_status_ok();
        server
            .get(&format!("/categories/{}", id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_invalid_slug_is_rejected() {
        let server = server().await;
        server
            .post("/categories")
            .json(&json!({ "name": "x", "display_name": "X", "slug": "Not A Slug" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = server().await;
        server
            .post("/categories")
            .json(&json!({ "display_name": "Missing name" }))
            .await
            .assert_status_bad_request();
    }
}
