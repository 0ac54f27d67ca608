//! API route configuration

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Build the API router
///
/// `max_body_size` caps the request body in bytes; oversized requests are
/// rejected before the handler runs. There is no per-request sentence-count
/// limit beyond that cap.
pub fn build_router(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/embeddings/", post(handlers::embeddings))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
