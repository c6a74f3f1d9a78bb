//! Read-only tree projections over the current module graph.
//!
//! Projections are pure functions of the graph. They hold no state and cache
//! no subtrees; every expansion re-derives children from the live graph, so a
//! newly published graph is visible on the very next query.

pub mod importees;
pub mod imports;
pub mod modules;
mod router;

pub use importees::ImporteesView;
pub use imports::ImportsView;
pub use modules::ByModuleView;
pub use router::{ViewMode, ViewRouter};

use serde::{Deserialize, Serialize};

use crate::model::{ModuleGraph, ModuleId, TranslationUnit, UnitId, unit_display_name};

/// Handle to a node in a projected tree.
///
/// Handles are plain values: the display surface echoes them back to expand a
/// node. The epoch ties a handle to the graph it was minted against; a handle
/// from a superseded graph expands to nothing instead of resurrecting stale
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    Module { epoch: u64, id: ModuleId },
    Unit { epoch: u64, id: UnitId },
}

impl TreeNode {
    pub fn epoch(&self) -> u64 {
        match *self {
            TreeNode::Module { epoch, .. } | TreeNode::Unit { epoch, .. } => epoch,
        }
    }
}

/// Displayable payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    pub label: String,
    /// Secondary label; the unit-kind name for module units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tooltip: String,
    /// Whether the display surface should offer to expand this node.
    pub expandable: bool,
    pub node: TreeNode,
}

/// A lazily-expanded hierarchical projection of the module graph.
pub trait TreeProjection: Send + Sync {
    /// Children of `node`, or the roots when `node` is `None`.
    fn children(&self, graph: &ModuleGraph, node: Option<TreeNode>) -> Vec<TreeNode>;

    /// Displayable form of `node`, or `None` for a stale or invalid handle.
    fn item(&self, graph: &ModuleGraph, node: TreeNode) -> Option<TreeItem>;
}

fn module_node(graph: &ModuleGraph, id: ModuleId) -> TreeNode {
    TreeNode::Module {
        epoch: graph.epoch(),
        id,
    }
}

fn unit_node(graph: &ModuleGraph, id: UnitId) -> TreeNode {
    TreeNode::Unit {
        epoch: graph.epoch(),
        id,
    }
}

/// Resolve a unit handle against the graph it was minted from.
fn live_unit(graph: &ModuleGraph, node: TreeNode) -> Option<(UnitId, &TranslationUnit)> {
    match node {
        TreeNode::Unit { epoch, id } if epoch == graph.epoch() => {
            graph.unit(id).map(|unit| (id, unit))
        }
        _ => None,
    }
}

/// Tooltip shared by every view that shows translation units.
fn unit_tooltip(unit: &TranslationUnit) -> String {
    match &unit.module {
        Some(mu) => format!("{} at {}", mu.kind.display_name(), unit.location),
        None => format!("Non-module unit at {}", unit.location),
    }
}

/// Secondary label: the unit-kind name for module units.
fn unit_description(unit: &TranslationUnit) -> Option<String> {
    unit.module
        .as_ref()
        .map(|mu| mu.kind.display_name().to_string())
}

/// Item shape shared by the two dependency views, which label units by their
/// full name.
fn dependency_item(
    graph: &ModuleGraph,
    node: TreeNode,
    expandable: impl FnOnce(&TranslationUnit) -> bool,
) -> Option<TreeItem> {
    let (_, unit) = live_unit(graph, node)?;
    Some(TreeItem {
        label: unit_display_name(unit),
        description: unit_description(unit),
        tooltip: unit_tooltip(unit),
        expandable: expandable(unit),
        node,
    })
}
