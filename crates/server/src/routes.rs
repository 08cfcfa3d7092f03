use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::cors::build_cors_layer;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/recommend", post(handlers::recommend))
        .with_state(state)
}

/// Router plus request tracing and CORS, as served by the binary
pub fn build_app(state: AppState, cors_origins: &str) -> Router {
    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins))
}
