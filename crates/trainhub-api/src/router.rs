//! Route definitions.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};

use crate::handlers::{health, training};
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Builds the API router.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    let api = Router::new()
        .route("/health", get(health::health))
        .route(
            "/method/upload_training_data",
            post(training::upload_training_data),
        );

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_logging))
        .with_state(state)
}
