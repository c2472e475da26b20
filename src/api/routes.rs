//! API Routes
//!
//! Configures the Axum router for the file server.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{file_handler, health_handler, index_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /` - Serves `index.html` from the serve root
/// - `GET /*path` - Serves any other file from the serve root
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/", get(index_handler))
        .route("/*path", get(file_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
