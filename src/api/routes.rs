//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_status_handler, health_handler, message_handler, prune_handler, remove_handler,
    set_ttl_handler, status_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /heavy?key=` / `GET /light?key=` - Cached computation
/// - `GET /status`, `GET /status/:cache` - Cache contents and counters
/// - `GET|POST /prune` - Clear caches
/// - `PUT /ttl` - Change the freshness window
/// - `DELETE /entries/:cache/:key` - Drop one entry
/// - `GET /`, `GET /health` - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(12 * 60 * 60));

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/heavy", get(message_handler))
        .route("/light", get(message_handler))
        .route("/status", get(status_handler))
        .route("/status/:cache", get(cache_status_handler))
        .route("/prune", get(prune_handler).post(prune_handler))
        .route("/ttl", put(set_ttl_handler))
        .route("/entries/:cache/:key", delete(remove_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
