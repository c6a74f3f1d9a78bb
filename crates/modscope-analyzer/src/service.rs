//! Applies analyzer notifications to the graph store.
//!
//! The snapshot pipeline — ingest, resolve, publish — runs synchronously to
//! completion for each notification, one at a time, in arrival order. Every
//! failure is absorbed here and converted into a store status transition;
//! nothing escapes to take the process down.

use std::sync::Arc;

use modscope_core::protocol::{ModulesNotification, RawModule, RawTranslationUnit};
use modscope_core::{GraphStore, ModuleGraph, SnapshotError, ingest, resolve};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Consumes analyzer notifications and drives the snapshot pipeline.
pub struct AnalyzerService {
    store: Arc<GraphStore>,
}

impl AnalyzerService {
    pub fn new(store: Arc<GraphStore>) -> Self {
        AnalyzerService { store }
    }

    /// Drain raw notification payloads until the channel closes.
    pub async fn run(&self, mut rx: mpsc::UnboundedReceiver<String>) {
        while let Some(payload) = rx.recv().await {
            self.apply_payload(&payload).await;
        }
    }

    /// Parse and apply one wire payload. A payload that fails schema
    /// validation invalidates the store like any other broken snapshot.
    pub async fn apply_payload(&self, payload: &str) {
        match serde_json::from_str::<ModulesNotification>(payload) {
            Ok(notification) => self.apply(notification).await,
            Err(err) => {
                warn!(error = %err, "rejecting malformed notification");
                self.store.mark_invalid().await;
            }
        }
    }

    /// Apply a single typed notification to the store.
    pub async fn apply(&self, notification: ModulesNotification) {
        match notification {
            ModulesNotification::Update {
                modules,
                translation_units,
            } => match build(&modules, &translation_units) {
                Ok(graph) => {
                    info!(
                        modules = graph.module_count(),
                        units = graph.unit_count(),
                        "snapshot resolved"
                    );
                    self.store.replace(graph).await;
                }
                Err(err) => {
                    warn!(error = %err, "rejecting broken snapshot");
                    self.store.mark_invalid().await;
                }
            },
            ModulesNotification::Pending => {
                info!("analyzer reports no current snapshot");
                self.store.mark_pending().await;
            }
        }
    }
}

fn build(
    modules: &[RawModule],
    units: &[RawTranslationUnit],
) -> Result<ModuleGraph, SnapshotError> {
    let names = ingest::ingest_modules(modules)?;
    let records = ingest::ingest_units(units)?;
    Ok(resolve(names, records)?)
}
