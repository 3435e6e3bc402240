//! API Routes
//!
//! Configures the Axum router over the shared cache.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, put_handler, snapshot_handler, stats_handler,
    AppState,
};

/// Creates the router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /put` - Insert or overwrite a key
/// - `GET /get/:key` - Retrieve a value (refreshes and splays the key)
/// - `DELETE /del/:key` - Remove a key if present
/// - `GET /snapshot` - Contents in ascending key order
/// - `GET /stats` - Activity counters
/// - `GET /health` - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/put", put(put_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/snapshot", get(snapshot_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
