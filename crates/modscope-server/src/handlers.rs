//! REST API handlers for the modscope server

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use modscope_core::{GraphStatus, TreeItem, TreeNode, ViewMode};

use crate::ServerState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Store status plus the user-facing message for non-valid states.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: GraphStatus,
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn get_status(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let status = state.store.status().await;
    let empty = state.store.is_empty().await;
    Json(StatusResponse {
        status,
        empty,
        message: status_message(status, empty),
    })
}

/// Message shown above the tree while the graph is not valid. The phrasing
/// distinguishes a first computation from stale data already on screen.
pub fn status_message(status: GraphStatus, empty: bool) -> Option<String> {
    match status {
        GraphStatus::Valid => None,
        GraphStatus::Empty => Some("Recalculating...".to_string()),
        GraphStatus::Pending => Some(if empty {
            "Recalculating...".to_string()
        } else {
            "⚠️ Module information below is out of date. Recalculating...".to_string()
        }),
        GraphStatus::Invalid => {
            Some("⚠️ Module information below is stale. Fix analyzer problems to refresh.".to_string())
        }
    }
}

/// Active view mode.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub mode: ViewMode,
    pub display_name: &'static str,
}

pub async fn get_view(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let mode = state.views.active().await;
    Json(ViewResponse {
        mode,
        display_name: mode.display_name(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SetViewRequest {
    pub mode: ViewMode,
}

pub async fn set_view(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SetViewRequest>,
) -> impl IntoResponse {
    state.views.set_active(request.mode).await;
    Json(ViewResponse {
        mode: request.mode,
        display_name: request.mode.display_name(),
    })
}

/// Root items of the active view.
pub async fn get_roots(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(expand(&state, None).await)
}

#[derive(Debug, Deserialize)]
pub struct ChildrenRequest {
    pub node: TreeNode,
}

/// Children of a previously returned tree node. Stale handles (from a
/// superseded graph) yield an empty list.
pub async fn get_children(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ChildrenRequest>,
) -> impl IntoResponse {
    Json(expand(&state, Some(request.node)).await)
}

async fn expand(state: &ServerState, node: Option<TreeNode>) -> Vec<TreeItem> {
    let mut items = Vec::new();
    for child in state.views.children(node).await {
        if let Some(item) = state.views.item(child).await {
            items.push(item);
        }
    }
    items
}
