//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    benchmark_handler, cache_stats_handler, health_handler, post_detail_handler, posts_handler,
    user_handler, users_handler, AppState,
};

/// Creates the main router with all endpoints configured.
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
        .route("/api/posts", get(posts_handler))
        .route("/api/posts/:id", get(post_detail_handler))
        .route("/api/users", get(users_handler))
        .route("/api/users/:id", get(user_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/benchmark", get(benchmark_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
