//! Builders for raw analyzer records used across tests.

use crate::error::SnapshotError;
use crate::model::ModuleGraph;
use crate::protocol::{RawImport, RawModule, RawModuleUnit, RawTranslationUnit};

pub fn segments(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

pub fn raw_module(name: &[&str]) -> RawModule {
    RawModule {
        name: segments(name),
    }
}

pub fn module_import(name: &[&str]) -> RawImport {
    RawImport {
        name: segments(name),
        is_partition: false,
    }
}

pub fn partition_import(name: &[&str]) -> RawImport {
    RawImport {
        name: segments(name),
        is_partition: true,
    }
}

/// A translation unit that is not a module unit.
pub fn plain_unit(identifier: &str, imports: Vec<RawImport>) -> RawTranslationUnit {
    RawTranslationUnit {
        identifier: identifier.to_string(),
        imports,
        module_unit: None,
    }
}

pub fn module_unit(
    identifier: &str,
    module: &[&str],
    is_interface: bool,
    partition: Option<&[&str]>,
    imports: Vec<RawImport>,
) -> RawTranslationUnit {
    RawTranslationUnit {
        identifier: identifier.to_string(),
        imports,
        module_unit: Some(RawModuleUnit {
            is_interface,
            module_name: segments(module),
            partition_name: partition.map(segments),
        }),
    }
}

/// Ingest and resolve one raw snapshot.
pub fn build_graph(
    modules: Vec<RawModule>,
    units: Vec<RawTranslationUnit>,
) -> Result<ModuleGraph, SnapshotError> {
    let names = crate::ingest::ingest_modules(&modules)?;
    let records = crate::ingest::ingest_units(&units)?;
    Ok(crate::resolve::resolve(names, records)?)
}
