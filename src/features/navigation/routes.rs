use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::navigation::handlers;
use crate::features::navigation::services::{LandingService, StructureLoader};

/// Public navigation routes
pub fn public_routes(loader: Arc<StructureLoader>, landing: Arc<LandingService>) -> Router {
    Router::new()
        .route("/api/navigation", get(handlers::get_navigation))
        .with_state(loader)
        .merge(
            Router::new()
                .route("/api/landing", get(handlers::get_landing))
                .with_state(landing),
        )
}

/// Admin navigation routes, nested under `/api/admin`
pub fn admin_routes(loader: Arc<StructureLoader>) -> Router {
    Router::new()
        .route("/structure", get(handlers::get_admin_structure))
        .with_state(loader)
}
