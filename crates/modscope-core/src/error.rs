//! Error taxonomy for snapshot ingestion and resolution.

use thiserror::Error;

/// A raw record violated the wire schema in a way the serde layer cannot
/// express. The whole notification is rejected; no partial model is exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty segment list in {context}")]
    EmptyName { context: &'static str },
    #[error("empty segment in {context}")]
    EmptySegment { context: &'static str },
}

/// The snapshot violated a structural invariant of the module graph.
///
/// Any of these rejects the snapshot as a whole; a graph with dangling or
/// duplicated references is worse than no graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokenSnapshot {
    #[error("module `{module}` has no primary interface unit")]
    MissingPrimary { module: String },
    #[error("module `{module}` has {count} primary interface units")]
    DuplicatePrimary { module: String, count: usize },
    #[error("duplicate module name `{module}`")]
    DuplicateModule { module: String },
    #[error("partition `{module}:{partition}` is defined by more than one unit")]
    DuplicatePartition { module: String, partition: String },
    #[error("partition import `{name}` in non-module unit `{location}`")]
    PartitionImportOutsideModule { name: String, location: String },
    #[error("unresolved partition import `{module}:{name}` in `{location}`")]
    UnresolvedPartition {
        module: String,
        name: String,
        location: String,
    },
    #[error("unresolved module import `{name}` in `{location}`")]
    UnresolvedModule { name: String, location: String },
    #[error("module unit `{location}` belongs to unknown module `{module}`")]
    UnknownOwningModule { module: String, location: String },
    #[error("import cycle involving `{location}`")]
    ImportCycle { location: String },
}

/// Any failure that invalidates an incoming snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Broken(#[from] BrokenSnapshot),
}
