//! Wire schema for analyzer snapshot notifications.
//!
//! The analyzer periodically publishes a complete, denormalized snapshot of
//! per-translation-unit records. The schema is strict: a notification whose
//! `event` discriminant is not one of the defined variants, or whose records
//! are structurally malformed, fails deserialization and the notification is
//! rejected as a whole.

use serde::{Deserialize, Serialize};

/// A name as a sequence of identifier segments, e.g. `["app", "core"]` for
/// `app.core`. Joining happens at ingestion.
pub type NameSegments = Vec<String>;

/// One notification from the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ModulesNotification {
    /// A complete snapshot replacing all previously published data.
    #[serde(rename_all = "camelCase")]
    Update {
        modules: Vec<RawModule>,
        translation_units: Vec<RawTranslationUnit>,
    },
    /// The analyzer has no current snapshot, e.g. the build is broken.
    Pending,
}

/// A module known to the analyzer, by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawModule {
    pub name: NameSegments,
}

/// A translation unit as reported by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTranslationUnit {
    /// Resource identifier of the source file.
    pub identifier: String,
    pub imports: Vec<RawImport>,
    /// Present iff this translation unit is a module unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_unit: Option<RawModuleUnit>,
}

/// An import declaration, unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImport {
    pub name: NameSegments,
    /// True if this import targets a partition of the enclosing module.
    pub is_partition: bool,
}

/// Module-unit metadata attached to a translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModuleUnit {
    /// True for the primary interface and interface partitions.
    pub is_interface: bool,
    pub module_name: NameSegments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_name: Option<NameSegments>,
}
