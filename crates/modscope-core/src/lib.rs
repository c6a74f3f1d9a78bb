//! modscope-core — module graph model, snapshot resolution, and tree views

pub mod error;
pub mod ingest;
pub mod model;
pub mod protocol;
pub mod resolve;
pub mod store;
pub mod views;


#[cfg(test)]
pub mod test_utils;

pub use error::{BrokenSnapshot, ProtocolError, SnapshotError};
pub use model::{
    Import, ImportTarget, Location, Module, ModuleGraph, ModuleId, ModuleUnit, ModuleUnitKind,
    TranslationUnit, UnitId,
};
pub use resolve::resolve;
pub use store::{GraphStatus, GraphStore, StoreReadGuard};
pub use views::{TreeItem, TreeNode, TreeProjection, ViewMode, ViewRouter};
