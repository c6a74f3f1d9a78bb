//! Routes tree queries to the active projection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::store::{GraphStatus, GraphStore};

use super::{ByModuleView, ImporteesView, ImportsView, TreeItem, TreeNode, TreeProjection};

/// Which projection the display surface currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Modules,
    Imports,
    Importees,
}

impl ViewMode {
    pub fn display_name(self) -> &'static str {
        match self {
            ViewMode::Modules => "Basic Info",
            ViewMode::Imports => "Imports",
            ViewMode::Importees => "Importees",
        }
    }
}

/// Forwards tree queries to the active projection and re-emits change
/// notifications on one stable stream, so the display surface never cares
/// which projection is active or how often it is swapped.
pub struct ViewRouter {
    store: Arc<GraphStore>,
    mode: RwLock<ViewMode>,
    changed: broadcast::Sender<()>,
    modules: ByModuleView,
    imports: ImportsView,
    importees: ImporteesView,
}

impl ViewRouter {
    pub fn new(store: Arc<GraphStore>) -> Self {
        let (changed, _) = broadcast::channel(16);
        ViewRouter {
            store,
            mode: RwLock::new(ViewMode::Modules),
            changed,
            modules: ByModuleView,
            imports: ImportsView,
            importees: ImporteesView,
        }
    }

    pub async fn active(&self) -> ViewMode {
        *self.mode.read().await
    }

    /// Switch the active projection. Fires one refresh on the router stream;
    /// existing subscriptions are untouched.
    pub async fn set_active(&self, mode: ViewMode) {
        let mut current = self.mode.write().await;
        if *current != mode {
            debug!(?mode, "switching active view");
            *current = mode;
            drop(current);
            let _ = self.changed.send(());
        }
    }

    /// The router's single external change-notification stream.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }

    /// Spawn the store-to-router forwarding loop.
    ///
    /// The store subscription is created before this returns, so no
    /// notification published afterward can be missed. Call once: this single
    /// subscription outlives every projection swap, so updates are never
    /// duplicated.
    pub fn spawn_forwarder(self: Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.store.subscribe();
        let router = self;
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(()) => {
                        let _ = router.changed.send(());
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Notifications carry no payload and consumers re-read
                        // current state, so missed ones collapse into one.
                        debug!(skipped, "change notifications lagged");
                        let _ = router.changed.send(());
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Children of `node` in the active view, or its roots for `None`.
    /// Anything but a valid graph presents as zero nodes.
    pub async fn children(&self, node: Option<TreeNode>) -> Vec<TreeNode> {
        let mode = self.active().await;
        let state = self.store.read().await;
        if state.status() != GraphStatus::Valid {
            return Vec::new();
        }
        self.projection(mode).children(state.graph(), node)
    }

    /// Displayable form of `node` in the active view.
    pub async fn item(&self, node: TreeNode) -> Option<TreeItem> {
        let mode = self.active().await;
        let state = self.store.read().await;
        if state.status() != GraphStatus::Valid {
            return None;
        }
        self.projection(mode).item(state.graph(), node)
    }

    fn projection(&self, mode: ViewMode) -> &dyn TreeProjection {
        match mode {
            ViewMode::Modules => &self.modules,
            ViewMode::Imports => &self.imports,
            ViewMode::Importees => &self.importees,
        }
    }
}
