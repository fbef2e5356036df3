use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::subcategories::handlers;
use crate::features::subcategories::services::SubcategoryService;

/// Admin subcategory routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<SubcategoryService>) -> Router {
    Router::new()
        .route(
            "/subcategories",
            get(handlers::list_subcategories).post(handlers::create_subcategory),
        )
        .route(
            "/subcategories/{id}",
            get(handlers::get_subcategory)
                .put(handlers::update_subcategory)
                .delete(handlers::delete_subcategory),
        )
        .route("/subcategories/{id}/children", get(handlers::list_children))
        .route(
            "/categories/{id}/subcategories",
            get(handlers::list_root_by_category),
        )
        .route(
            "/categories/{id}/subcategories/flat",
            get(handlers::list_flat_by_category),
        )
        .with_state(service)
}
