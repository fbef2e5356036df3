use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Admin user routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            put(handlers::update_user).delete(handlers::delete_user),
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
        let service = Arc::new(UserService::new(test_pool().await, 4));
        TestServer::new(with_admin_auth(admin_routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let server = server().await;

        let response = server
            .post("/users")
            .json(&json!({
                "username": "editor",
                "email": "editor@example.com",
                "password": "correct-horse"
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["data"].get("password_hash").is_none());

        let body: Value = server.get("/users").await.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["username"], "editor");
    }

    #[tokio::test]
    async fn test_create_rejects_short_password() {
        let server = server().await;
        let response = server
            .post("/users")
            .json(&json!({
                "username": "editor",
                "email": "editor@example.com",
                "password": "short"
            }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let server = server().await;
        let payload = json!({
            "username": "editor",
            "email": "editor@example.com",
            "password": "correct-horse"
        });
        server.post("/users").json(&payload).await.assert_status_ok();

        let response = server.post("/users").json(&payload).await;
        response.assert_status(axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let server = server().await;
        server.delete("/users/999").await.assert_status_not_found();
    }
}
