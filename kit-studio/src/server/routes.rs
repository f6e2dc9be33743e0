use crate::server::handlers;
use crate::server::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use kit_core::MAX_IMAGE_BYTES;

/// Largest accepted request body: a source image and a selfie, base64 encoded, plus the form.
pub const MAX_BODY_BYTES: usize = MAX_IMAGE_BYTES * 3;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/formats", get(handlers::list_formats))
        .route("/status", get(handlers::status))
        .route("/source-image", post(handlers::generate_source_image))
        .route("/kit", get(handlers::latest_kit).post(handlers::generate_kit))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
