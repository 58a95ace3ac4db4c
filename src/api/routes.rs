//! API Routes
//!
//! Configures the Axum router with all cache monitor endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clean_handler, clear_handler, delete_entry_handler, get_entry_handler, health_handler,
    invalidate_analysis_handler, invalidate_handler, set_entry_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
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
        .route("/health", get(health_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/clean", post(clean_handler))
        .route("/cache/clear", post(clear_handler))
        .route("/cache/entries", put(set_entry_handler))
        .route(
            "/cache/entries/:key",
            get(get_entry_handler).delete(delete_entry_handler),
        )
        .route("/cache/invalidate", post(invalidate_handler))
        .route("/cache/invalidate/analysis", post(invalidate_analysis_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
