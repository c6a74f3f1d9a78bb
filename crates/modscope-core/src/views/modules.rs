//! By-module view: one root per module, children are its owned units.

use crate::model::{ModuleGraph, unit_local_display_name};

use super::{
    TreeItem, TreeNode, TreeProjection, live_unit, module_node, unit_description, unit_node,
    unit_tooltip,
};

pub struct ByModuleView;

impl TreeProjection for ByModuleView {
    fn children(&self, graph: &ModuleGraph, node: Option<TreeNode>) -> Vec<TreeNode> {
        match node {
            None => graph
                .modules()
                .map(|(id, _)| module_node(graph, id))
                .collect(),
            Some(TreeNode::Module { epoch, id }) if epoch == graph.epoch() => {
                let Some(module) = graph.module(id) else {
                    return Vec::new();
                };
                // Primary first, then interface partitions, implementation
                // partitions, implementation units.
                std::iter::once(module.primary)
                    .chain(module.interface_partitions.iter().copied())
                    .chain(module.implementation_partitions.iter().copied())
                    .chain(module.implementation_units.iter().copied())
                    .map(|unit| unit_node(graph, unit))
                    .collect()
            }
            // Units are leaves; stale handles expand to nothing.
            Some(_) => Vec::new(),
        }
    }

    fn item(&self, graph: &ModuleGraph, node: TreeNode) -> Option<TreeItem> {
        match node {
            TreeNode::Module { epoch, id } if epoch == graph.epoch() => {
                let module = graph.module(id)?;
                let count = module.unit_count();
                let tooltip = if count > 1 {
                    format!("Module {} ({} module units)", module.name, count)
                } else {
                    format!("Module {} (single unit)", module.name)
                };
                Some(TreeItem {
                    label: module.name.clone(),
                    description: None,
                    tooltip,
                    expandable: true,
                    node,
                })
            }
            TreeNode::Unit { .. } => {
                let (_, unit) = live_unit(graph, node)?;
                Some(TreeItem {
                    label: unit_local_display_name(unit),
                    description: unit_description(unit),
                    tooltip: unit_tooltip(unit),
                    expandable: false,
                    node,
                })
            }
            _ => None,
        }
    }
}
