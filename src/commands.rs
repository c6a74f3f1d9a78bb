//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use modscope_analyzer::{AnalyzerService, FsEnumerator, SourceEnumerator};
use modscope_core::{GraphStore, ViewRouter};
use modscope_server::{ModscopeServer, ServerConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub async fn serve(host: String, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting modscope server on {}:{}", host, port);

    let store = Arc::new(GraphStore::new());
    let views = Arc::new(ViewRouter::new(Arc::clone(&store)));

    // Forward store changes onto the router's notification stream.
    Arc::clone(&views).spawn_forwarder();

    // Snapshot notifications arrive as JSON Lines on stdin; the pipeline
    // consumes them one at a time, in order.
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(read_notifications(tx));

    let service = AnalyzerService::new(Arc::clone(&store));
    tokio::spawn(async move { service.run(rx).await });

    let config = ServerConfig { host, port };
    ModscopeServer::new(store, views, config).start().await
}

/// Read JSON-Lines notification payloads from stdin until it closes.
async fn read_notifications(tx: mpsc::UnboundedSender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                if tx.send(line).is_err() {
                    break;
                }
            }
            Ok(None) => {
                tracing::info!("analyzer input closed");
                break;
            }
            Err(err) => {
                tracing::error!("stdin read error: {err}");
                break;
            }
        }
    }
}

pub fn scan(root: PathBuf) -> anyhow::Result<()> {
    let root = root
        .canonicalize()
        .with_context(|| format!("cannot resolve {}", root.display()))?;
    tracing::info!("Scanning {}", root.display());

    let units = FsEnumerator.enumerate(&root)?;
    for location in &units {
        println!("{location}");
    }
    tracing::info!("{} candidate translation units", units.len());
    Ok(())
}
