//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{get_user, liveness, readiness, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/liveness", get(liveness))
        // Path spelling is part of the published contract.
        .route("/readness", get(readiness))
        // User endpoints
        .route("/api/v1/users/:user_id", get(get_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
