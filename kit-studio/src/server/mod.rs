pub mod cors;
mod handlers;
mod routes;
pub mod state;

pub use cors::{build_cors_layer, is_local_origin};
pub use handlers::{ApiError, FormatInfo, SourceImageResponse, StatusResponse, status_for};
pub use routes::{MAX_BODY_BYTES, api_routes};
pub use state::{AppState, BusyFlags, BusyPermit, BusyStatus, Operation, SharedGenerator};

use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// The full application: `/api` routes, CORS, request tracing, and an optional
/// static frontend served from `static_dir`.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .nest("/api", api_routes())
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
        tracing::info!(dir = %dir.display(), "serving static files");
    }
    app
}
