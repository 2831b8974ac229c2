//! Route definitions for the gateway API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use gateway_core::MAX_DOCUMENT_BYTES;

use crate::{handlers, middleware, state::AppState};

// Above the relay cap so oversize uploads reach the validator and get the
// classified 400 instead of a bare 413. Covers multipart framing overhead.
const BODY_LIMIT_BYTES: usize = MAX_DOCUMENT_BYTES * 2;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .nest("/chat", chat_routes())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::cors_layer())
        .with_state(state)
}

/// Chat routes, one per capability plus composite health
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/database", post(handlers::chat_database))
        .route("/rag", post(handlers::chat_rag))
        .route("/smart", post(handlers::chat_smart))
        .route("/ocr", post(handlers::chat_ocr))
        .route("/health", get(handlers::health))
}
