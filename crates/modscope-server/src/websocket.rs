//! WebSocket change-notification stream for display clients

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use modscope_core::GraphStatus;

use crate::{ServerState, handlers::status_message};

/// Messages pushed to display clients. Change events carry no graph payload;
/// clients re-read current state over the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Current status; sent on connect and after every change notification.
    GraphChanged {
        status: GraphStatus,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Keepalive from the client.
    Ping,
    Pong,
}

/// Handle WebSocket upgrade requests
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<ServerState>) {
    info!("display client connected");

    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.views.subscribe();

    // Initial state so the client can render immediately.
    if let Some(msg) = changed_message(&state).await {
        if sender.send(Message::Text(msg)).await.is_err() {
            warn!("failed to send initial state to display client");
            return;
        }
    }

    let send_state = Arc::clone(&state);
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    let Some(msg) = changed_message(&send_state).await else {
                        continue;
                    };
                    if sender.send(Message::Text(msg)).await.is_err() {
                        debug!("failed to send to display client");
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<WsMessage>(&text) {
                    Ok(WsMessage::Ping) => debug!("ping"),
                    Ok(other) => debug!(?other, "client message"),
                    Err(err) => warn!("unparseable client message: {err}"),
                },
                Message::Close(_) => {
                    debug!("display client closed the connection");
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    info!("display client disconnected");
}

async fn changed_message(state: &ServerState) -> Option<String> {
    let status = state.store.status().await;
    let empty = state.store.is_empty().await;
    let msg = WsMessage::GraphChanged {
        status,
        message: status_message(status, empty),
    };
    serde_json::to_string(&msg).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_message_serialization() {
        let msg = WsMessage::GraphChanged {
            status: GraphStatus::Valid,
            message: None,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("graph_changed"));
        assert!(json.contains("valid"));
        assert!(!json.contains("message"));

        let msg = WsMessage::Ping;
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("ping"));
    }

    #[tokio::test]
    async fn changed_message_carries_the_pending_text() {
        let store = Arc::new(modscope_core::GraphStore::new());
        let views = Arc::new(modscope_core::ViewRouter::new(Arc::clone(&store)));
        let state = ServerState::new(store, views);

        state.store.mark_pending().await;
        let msg = changed_message(&state).await.unwrap();
        assert!(msg.contains("pending"));
        assert!(msg.contains("Recalculating"));
    }
}
