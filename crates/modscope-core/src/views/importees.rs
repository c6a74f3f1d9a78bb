//! Reverse-importees view: who imports each translation unit.
//!
//! Roots are the units with no outgoing imports — the foundations of the
//! dependency order. Expansion walks the derived `importers` sets.

use crate::model::ModuleGraph;

use super::{TreeItem, TreeNode, TreeProjection, dependency_item, live_unit, unit_node};

pub struct ImporteesView;

impl TreeProjection for ImporteesView {
    fn children(&self, graph: &ModuleGraph, node: Option<TreeNode>) -> Vec<TreeNode> {
        match node {
            None => graph
                .units()
                .filter(|(_, unit)| unit.imports.is_empty())
                .map(|(id, _)| unit_node(graph, id))
                .collect(),
            Some(node) => {
                let Some((_, unit)) = live_unit(graph, node) else {
                    return Vec::new();
                };
                match &unit.module {
                    Some(mu) => mu
                        .importers
                        .iter()
                        .map(|&importer| unit_node(graph, importer))
                        .collect(),
                    // Non-module units cannot be imported.
                    None => Vec::new(),
                }
            }
        }
    }

    fn item(&self, graph: &ModuleGraph, node: TreeNode) -> Option<TreeItem> {
        dependency_item(graph, node, |unit| {
            unit.module
                .as_ref()
                .is_some_and(|mu| !mu.importers.is_empty())
        })
    }
}
