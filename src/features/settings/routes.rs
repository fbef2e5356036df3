use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::settings::handlers;
use crate::features::settings::services::SettingsService;

/// Public settings routes
pub fn public_routes(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route("/api/settings/public", get(handlers::get_public_settings))
        .with_state(service)
}

/// Admin settings routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route("/settings", get(handlers::list_settings))
        .route(
            "/settings/{key}",
            put(handlers::update_setting).delete(handlers::delete_setting),
        )
        .with_state(service)
}
