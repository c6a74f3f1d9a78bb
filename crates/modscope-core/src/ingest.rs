//! Snapshot ingestion: raw wire records to typed, reference-free unit records.
//!
//! A pure transform. Names arrive as segment sequences and are joined into
//! the canonical dotted form used everywhere downstream; no cross-references
//! are resolved here.

use crate::error::ProtocolError;
use crate::model::{Location, ModuleUnitKind};
use crate::protocol::{NameSegments, RawModule, RawTranslationUnit};

/// An import as declared, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub name: String,
    pub is_partition: bool,
}

/// Module-unit metadata before resolution; `importers` does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleUnitDecl {
    pub module_name: String,
    pub kind: ModuleUnitKind,
    pub partition_name: Option<String>,
}

/// A typed translation-unit record with imports by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRecord {
    pub location: Location,
    pub imports: Vec<ImportDecl>,
    pub module: Option<ModuleUnitDecl>,
}

/// Convert raw module records to canonical dotted names.
pub fn ingest_modules(raw: &[RawModule]) -> Result<Vec<String>, ProtocolError> {
    raw.iter()
        .map(|module| join_name(&module.name, "module name"))
        .collect()
}

/// Convert raw translation-unit records to typed unit records.
pub fn ingest_units(raw: &[RawTranslationUnit]) -> Result<Vec<UnitRecord>, ProtocolError> {
    raw.iter().map(ingest_unit).collect()
}

fn ingest_unit(raw: &RawTranslationUnit) -> Result<UnitRecord, ProtocolError> {
    let imports = raw
        .imports
        .iter()
        .map(|import| {
            Ok(ImportDecl {
                name: join_name(&import.name, "import name")?,
                is_partition: import.is_partition,
            })
        })
        .collect::<Result<Vec<_>, ProtocolError>>()?;

    let module = raw
        .module_unit
        .as_ref()
        .map(|mu| {
            let partition_name = mu
                .partition_name
                .as_ref()
                .map(|segments| join_name(segments, "partition name"))
                .transpose()?;
            Ok(ModuleUnitDecl {
                module_name: join_name(&mu.module_name, "module name")?,
                kind: classify(mu.is_interface, partition_name.is_some()),
                partition_name,
            })
        })
        .transpose()?;

    Ok(UnitRecord {
        location: Location(raw.identifier.clone()),
        imports,
        module,
    })
}

/// Unit kind from the two raw booleans. This table is exhaustive; no other
/// raw combination exists.
fn classify(is_interface: bool, has_partition: bool) -> ModuleUnitKind {
    match (is_interface, has_partition) {
        (true, false) => ModuleUnitKind::PrimaryInterface,
        (true, true) => ModuleUnitKind::InterfacePartition,
        (false, true) => ModuleUnitKind::ImplementationPartition,
        (false, false) => ModuleUnitKind::Implementation,
    }
}

/// Join dotted-name segments, rejecting structurally empty names.
fn join_name(segments: &NameSegments, context: &'static str) -> Result<String, ProtocolError> {
    if segments.is_empty() {
        return Err(ProtocolError::EmptyName { context });
    }
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ProtocolError::EmptySegment { context });
    }
    Ok(segments.join("."))
}
