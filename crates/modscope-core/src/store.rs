//! Shared store for the current module graph.
//!
//! Single writer, many readers: the snapshot pipeline swaps graphs in
//! atomically; projection queries read concurrently. Subscribers get a
//! payload-free change notification and re-read the live state — no diff is
//! ever delivered.

use tokio::sync::{RwLock, RwLockReadGuard, broadcast};
use tracing::debug;

use crate::model::ModuleGraph;

/// Validity of the store's current contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphStatus {
    /// No snapshot has ever been published.
    Empty,
    /// The analyzer is recomputing; on-screen data may be out of date.
    Pending,
    Valid,
    /// The last snapshot was rejected; stored content is not trustworthy.
    Invalid,
}

struct StoreState {
    status: GraphStatus,
    graph: ModuleGraph,
}

/// Owner of the current validated graph.
pub struct GraphStore {
    state: RwLock<StoreState>,
    changed: broadcast::Sender<()>,
}

impl GraphStore {
    pub fn new() -> Self {
        let (changed, _) = broadcast::channel(16);
        GraphStore {
            state: RwLock::new(StoreState {
                status: GraphStatus::Empty,
                graph: ModuleGraph::default(),
            }),
            changed,
        }
    }

    /// Atomically publish a newly resolved graph and notify subscribers.
    pub async fn replace(&self, mut graph: ModuleGraph) {
        {
            let mut state = self.state.write().await;
            graph.stamp_epoch(state.graph.epoch() + 1);
            debug!(
                epoch = graph.epoch(),
                modules = graph.module_count(),
                units = graph.unit_count(),
                "publishing module graph"
            );
            state.graph = graph;
            state.status = GraphStatus::Valid;
        }
        self.notify_changed();
    }

    /// The analyzer reported it has no current snapshot.
    pub async fn mark_pending(&self) {
        self.set_status(GraphStatus::Pending).await;
    }

    /// The last snapshot was rejected as broken.
    pub async fn mark_invalid(&self) {
        self.set_status(GraphStatus::Invalid).await;
    }

    async fn set_status(&self, status: GraphStatus) {
        {
            self.state.write().await.status = status;
        }
        self.notify_changed();
    }

    pub async fn status(&self) -> GraphStatus {
        self.state.read().await.status
    }

    /// True iff the current unit table is empty, independent of status. Used
    /// to phrase "first computation" against "stale data on screen".
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.graph.is_empty()
    }

    /// Read access to the current status and graph. Consumers re-read after
    /// every change notification; entities do not survive a replacement.
    pub async fn read(&self) -> StoreReadGuard<'_> {
        StoreReadGuard {
            inner: self.state.read().await,
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }

    fn notify_changed(&self) {
        // No receivers just means nothing is displaying yet.
        let _ = self.changed.send(());
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the store's state while the guard is held.
pub struct StoreReadGuard<'a> {
    inner: RwLockReadGuard<'a, StoreState>,
}

impl StoreReadGuard<'_> {
    pub fn status(&self) -> GraphStatus {
        self.inner.status
    }

    pub fn graph(&self) -> &ModuleGraph {
        &self.inner.graph
    }
}
