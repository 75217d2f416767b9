pub mod health;
pub mod mcp;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Liveness
        .route("/health", get(health::health_check))
        // JSON-RPC messages, notification stream, session teardown
        .route(
            "/mcp",
            post(mcp::handle_message)
                .get(mcp::open_stream)
                .delete(mcp::close_session),
        )
}
