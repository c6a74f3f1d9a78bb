//! Forward-imports view: what each translation unit imports.
//!
//! Roots are the units nothing imports. The graph is unfolded into a tree:
//! a unit imported from two places appears under both, with equal subtrees.
//! Termination relies on the resolver's acyclicity guarantee.

use crate::model::{ImportTarget, ModuleGraph};

use super::{TreeItem, TreeNode, TreeProjection, dependency_item, live_unit, unit_node};

pub struct ImportsView;

impl TreeProjection for ImportsView {
    fn children(&self, graph: &ModuleGraph, node: Option<TreeNode>) -> Vec<TreeNode> {
        match node {
            // Non-module units can never be imported, so they always root.
            None => graph
                .units()
                .filter(|(_, unit)| {
                    unit.module
                        .as_ref()
                        .is_none_or(|mu| mu.importers.is_empty())
                })
                .map(|(id, _)| unit_node(graph, id))
                .collect(),
            Some(node) => {
                let Some((_, unit)) = live_unit(graph, node) else {
                    return Vec::new();
                };
                unit.imports
                    .iter()
                    .filter_map(|import| {
                        // A module import presents as the module's primary
                        // interface; a partition import as the partition unit.
                        let target = match import.target {
                            ImportTarget::Module(module_id) => graph.module(module_id)?.primary,
                            ImportTarget::Partition(unit_id) => unit_id,
                        };
                        Some(unit_node(graph, target))
                    })
                    .collect()
            }
        }
    }

    fn item(&self, graph: &ModuleGraph, node: TreeNode) -> Option<TreeItem> {
        dependency_item(graph, node, |unit| !unit.imports.is_empty())
    }
}
