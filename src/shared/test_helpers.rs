use axum::{extract::Request, middleware::Next, response::Response, Router};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::password::hash_password;

/// Fresh in-memory database with all migrations applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

/// Insert a user directly and return its id
pub async fn seed_user(pool: &SqlitePool, username: &str, password: &str) -> i64 {
    let password_hash = hash_password(password.to_string(), 4)
        .await
        .expect("hash password");

    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, password_hash, email) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(format!("{}@example.com", username))
    .fetch_one(pool)
    .await
    .expect("seed user")
}

pub fn test_admin() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 0,
        username: "test-admin".to_string(),
    }
}

async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(test_admin());
    next.run(request).await
}

/// Wrap a router so every request carries an authenticated admin
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
