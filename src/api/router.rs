use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::workflow;

/// Create the application router
///
/// The API is intentionally open: the UI is served from another origin, so
/// CORS stays permissive.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::get_health))
        .route("/workflow/run", post(workflow::run_workflow))
        .route("/workflow/history", get(workflow::get_history))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
