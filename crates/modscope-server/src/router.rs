//! Axum router setup for the modscope server

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{get_children, get_roots, get_status, get_view, health_check, set_view},
    websocket::ws_handler,
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // WebSocket endpoint for change notifications
        .route("/ws", get(ws_handler))
        // REST API endpoints
        .route("/api/health", get(health_check))
        .route("/api/status", get(get_status))
        .route("/api/view", get(get_view).put(set_view))
        .route("/api/tree", get(get_roots))
        .route("/api/tree/children", post(get_children))
        // Add CORS support
        .layer(CorsLayer::permissive())
        // Add state
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modscope_core::{GraphStore, ViewRouter};

    #[test]
    fn router_builds_with_fresh_state() {
        let store = Arc::new(GraphStore::new());
        let views = Arc::new(ViewRouter::new(Arc::clone(&store)));
        let state = Arc::new(ServerState::new(store, views));
        let _router = create_router(state);
    }
}
