//! API Routes
//!
//! Configures the Axum router with all key-value endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, list_handler, set_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /get` - Look up a key
/// - `POST /set` - Store a key-value pair with optional TTL
/// - `POST /delete` - Delete a key
/// - `POST /list` - List live pairs, up to a limit
/// - `GET /health` - Health check endpoint
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
        .route("/get", post(get_handler))
        .route("/set", post(set_handler))
        .route("/delete", post(delete_handler))
        .route("/list", post(list_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
