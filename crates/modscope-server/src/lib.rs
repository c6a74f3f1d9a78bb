//! HTTP + WebSocket display surface for the module graph

pub mod handlers;
pub mod router;
pub mod websocket;

use std::sync::Arc;

use anyhow::Context;
use modscope_core::{GraphStore, ViewRouter};
use tracing::info;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Shared state handed to every handler.
pub struct ServerState {
    pub store: Arc<GraphStore>,
    pub views: Arc<ViewRouter>,
}

impl ServerState {
    pub fn new(store: Arc<GraphStore>, views: Arc<ViewRouter>) -> Self {
        ServerState { store, views }
    }
}

/// The display-surface server.
pub struct ModscopeServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl ModscopeServer {
    pub fn new(store: Arc<GraphStore>, views: Arc<ViewRouter>, config: ServerConfig) -> Self {
        ModscopeServer {
            state: Arc::new(ServerState::new(store, views)),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let app = router::create_router(self.state);
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!("listening on http://{addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
