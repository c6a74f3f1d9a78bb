//! Integration tests for modscope
//!
//! Drive the full snapshot pipeline — payload parsing, ingestion, resolution,
//! store publication, and the view router — wired the same way the serve
//! command wires it.

use std::sync::Arc;
use std::time::Duration;

use modscope_analyzer::AnalyzerService;
use modscope_core::{GraphStatus, GraphStore, ViewMode, ViewRouter};
use tokio::sync::mpsc;

fn pipeline() -> (AnalyzerService, Arc<GraphStore>, Arc<ViewRouter>) {
    let store = Arc::new(GraphStore::new());
    let views = Arc::new(ViewRouter::new(Arc::clone(&store)));
    Arc::clone(&views).spawn_forwarder();
    (AnalyzerService::new(Arc::clone(&store)), store, views)
}

const SNAPSHOT: &str = r#"{
    "event": "update",
    "modules": [{"name": ["app"]}, {"name": ["app", "util"]}],
    "translationUnits": [
        {
            "identifier": "file:///work/src/app.cppm",
            "imports": [
                {"name": ["app", "util"], "isPartition": false},
                {"name": ["io"], "isPartition": true},
                {"name": ["std"], "isPartition": false}
            ],
            "moduleUnit": {"isInterface": true, "moduleName": ["app"]}
        },
        {
            "identifier": "file:///work/src/app_io.cppm",
            "imports": [],
            "moduleUnit": {
                "isInterface": true,
                "moduleName": ["app"],
                "partitionName": ["io"]
            }
        },
        {
            "identifier": "file:///work/src/util.cppm",
            "imports": [],
            "moduleUnit": {"isInterface": true, "moduleName": ["app", "util"]}
        },
        {
            "identifier": "file:///work/src/main.cpp",
            "imports": [{"name": ["app"], "isPartition": false}]
        }
    ]
}"#;

#[tokio::test]
async fn snapshot_flows_from_payload_to_views() {
    let (service, store, views) = pipeline();

    service.apply_payload(SNAPSHOT).await;
    assert_eq!(store.status().await, GraphStatus::Valid);

    // By-module view: one root per module, units beneath.
    let roots = views.children(None).await;
    assert_eq!(roots.len(), 2);
    let app = views.item(roots[0]).await.unwrap();
    assert_eq!(app.label, "app");
    assert_eq!(app.tooltip, "Module app (2 module units)");
    let app_children = views.children(Some(roots[0])).await;
    assert_eq!(app_children.len(), 2);

    // Forward-imports view: only main.cpp is imported by nothing; it expands
    // to the primary it imports. The unknown `std` import was silently
    // dropped.
    views.set_active(ViewMode::Imports).await;
    let roots = views.children(None).await;
    let labels: Vec<String> = items(&views, &roots).await;
    assert_eq!(labels, vec!["main.cpp".to_string()]);

    let main = roots[0];
    let main_children = views.children(Some(main)).await;
    let labels: Vec<String> = items(&views, &main_children).await;
    assert_eq!(labels, vec!["app".to_string()]);

    let primary_children = views.children(Some(main_children[0])).await;
    let labels: Vec<String> = items(&views, &primary_children).await;
    assert_eq!(labels, vec!["app.util".to_string(), "app :io".to_string()]);

    // Reverse-importees view: leaves of the dependency order root.
    views.set_active(ViewMode::Importees).await;
    let roots = views.children(None).await;
    let labels: Vec<String> = items(&views, &roots).await;
    assert_eq!(labels, vec!["app :io".to_string(), "app.util".to_string()]);
}

#[tokio::test]
async fn broken_snapshot_suppresses_all_views() {
    let (service, store, views) = pipeline();

    service.apply_payload(SNAPSHOT).await;
    assert_eq!(views.children(None).await.len(), 2);

    // Duplicate primary interface for `app` breaks the snapshot.
    let broken = r#"{
        "event": "update",
        "modules": [{"name": ["app"]}],
        "translationUnits": [
            {
                "identifier": "file:///work/src/a.cppm",
                "imports": [],
                "moduleUnit": {"isInterface": true, "moduleName": ["app"]}
            },
            {
                "identifier": "file:///work/src/b.cppm",
                "imports": [],
                "moduleUnit": {"isInterface": true, "moduleName": ["app"]}
            }
        ]
    }"#;
    service.apply_payload(broken).await;

    assert_eq!(store.status().await, GraphStatus::Invalid);
    assert!(views.children(None).await.is_empty());
    // The previous content's existence signal is still observable.
    assert!(!store.is_empty().await);
}

#[tokio::test]
async fn pending_then_update_recovers() {
    let (service, store, views) = pipeline();
    let mut changes = views.subscribe();

    service.apply_payload(r#"{"event": "pending"}"#).await;
    assert_eq!(store.status().await, GraphStatus::Pending);
    assert!(views.children(None).await.is_empty());

    service.apply_payload(SNAPSHOT).await;
    assert_eq!(store.status().await, GraphStatus::Valid);
    assert_eq!(views.children(None).await.len(), 2);

    // Both transitions reached the router's notification stream.
    for _ in 0..2 {
        tokio::time::timeout(Duration::from_secs(1), changes.recv())
            .await
            .expect("change notification should arrive")
            .unwrap();
    }
}

#[tokio::test]
async fn notifications_apply_in_channel_order() {
    let (service, store, _views) = pipeline();
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(SNAPSHOT.to_string()).unwrap();
    tx.send(r#"{"event": "pending"}"#.to_string()).unwrap();
    tx.send(SNAPSHOT.to_string()).unwrap();
    drop(tx);

    service.run(rx).await;
    assert_eq!(store.status().await, GraphStatus::Valid);
    assert_eq!(store.read().await.graph().epoch(), 2);
}

async fn items(views: &ViewRouter, nodes: &[modscope_core::TreeNode]) -> Vec<String> {
    let mut labels = Vec::new();
    for &node in nodes {
        labels.push(views.item(node).await.unwrap().label);
    }
    labels
}
