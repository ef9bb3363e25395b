use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::chargesites::handlers;
use crate::features::chargesites::services::ChargeSiteService;

/// Create routes for the charge sites feature
pub fn routes(service: Arc<ChargeSiteService>) -> Router {
    Router::new()
        .route(
            "/api/chargesites",
            get(handlers::list_charge_sites).post(handlers::create_charge_site),
        )
        // Static segment is matched before the {id} capture
        .route("/api/chargesites/params", get(handlers::get_query_policy))
        .route(
            "/api/chargesites/{id}",
            get(handlers::get_charge_site)
                .put(handlers::update_charge_site)
                .delete(handlers::delete_charge_site),
        )
        .with_state(service)
}
