//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_handler, health_handler, liveness_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/*path` - Cache-aside lookup; path and query identify the entry
/// - `GET /stats` - Memory-tier statistics
/// - `GET /health` - Health check endpoint
/// - `GET /liveness` - Liveness probe
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/api/*path", get(cache_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/liveness", get(liveness_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
