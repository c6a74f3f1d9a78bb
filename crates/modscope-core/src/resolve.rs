//! Graph resolution: typed unit records to a fully linked module graph.
//!
//! Resolution is an all-or-nothing transaction. Any integrity failure rejects
//! the snapshot; no partial graph is ever produced.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use tracing::debug;

use crate::error::BrokenSnapshot;
use crate::ingest::{ImportDecl, UnitRecord};
use crate::model::{
    Import, ImportTarget, Module, ModuleGraph, ModuleId, ModuleUnit, ModuleUnitKind,
    TranslationUnit, UnitId,
};

/// Build the resolved graph for one snapshot.
///
/// `module_names` are the analyzer's known modules; `records` the ingested
/// translation units. Both come from the same snapshot.
pub fn resolve(
    module_names: Vec<String>,
    records: Vec<UnitRecord>,
) -> Result<ModuleGraph, BrokenSnapshot> {
    // Locate each module's primary interface unit by exact name match.
    // Exactly one match per module; duplicate module names are equally fatal.
    let mut modules: Vec<Module> = Vec::with_capacity(module_names.len());
    let mut module_lookup: HashMap<String, ModuleId> = HashMap::with_capacity(module_names.len());
    for name in module_names {
        if module_lookup.contains_key(&name) {
            return Err(BrokenSnapshot::DuplicateModule { module: name });
        }
        let mut matches = records.iter().enumerate().filter(|(_, record)| {
            record.module.as_ref().is_some_and(|mu| {
                mu.kind == ModuleUnitKind::PrimaryInterface && mu.module_name == name
            })
        });
        let primary = match matches.next() {
            Some((ix, _)) => UnitId(ix as u32),
            None => return Err(BrokenSnapshot::MissingPrimary { module: name }),
        };
        let extra = matches.count();
        if extra > 0 {
            return Err(BrokenSnapshot::DuplicatePrimary {
                module: name,
                count: 1 + extra,
            });
        }
        module_lookup.insert(name.clone(), ModuleId(modules.len() as u32));
        modules.push(Module {
            name,
            primary,
            interface_partitions: Vec::new(),
            implementation_partitions: Vec::new(),
            implementation_units: Vec::new(),
        });
    }

    // Partition index. A (module, partition) pair identifies at most one unit.
    let mut partition_lookup: HashMap<(&str, &str), UnitId> = HashMap::new();
    for (ix, record) in records.iter().enumerate() {
        let Some(mu) = &record.module else { continue };
        let Some(partition) = &mu.partition_name else {
            continue;
        };
        if partition_lookup
            .insert((mu.module_name.as_str(), partition.as_str()), UnitId(ix as u32))
            .is_some()
        {
            return Err(BrokenSnapshot::DuplicatePartition {
                module: mu.module_name.clone(),
                partition: partition.clone(),
            });
        }
    }

    // Import filtering: non-partition imports of modules outside the analyzed
    // set (standard library, third-party) are dropped here, so every import
    // that survives must resolve below. Partition imports are never filtered;
    // partitions have no cross-module meaning.
    let retained: Vec<Vec<&ImportDecl>> = records
        .iter()
        .map(|record| {
            record
                .imports
                .iter()
                .filter(|decl| {
                    let keep = decl.is_partition || module_lookup.contains_key(&decl.name);
                    if !keep {
                        debug!(import = %decl.name, unit = %record.location,
                            "dropping import of unknown module");
                    }
                    keep
                })
                .collect()
        })
        .collect();

    // Resolution. Every retained import gets a target, and the importing unit
    // is appended to that target's importer set; `importers` exists only as
    // this side effect.
    let mut importers: Vec<Vec<UnitId>> = vec![Vec::new(); records.len()];
    let mut resolved: Vec<Vec<Import>> = Vec::with_capacity(records.len());
    for (ix, record) in records.iter().enumerate() {
        let importer = UnitId(ix as u32);
        let mut imports = Vec::with_capacity(retained[ix].len());
        for decl in &retained[ix] {
            let target = if decl.is_partition {
                // Partitions are private to their module: resolve relative to
                // the importing unit's own module.
                let Some(mu) = &record.module else {
                    return Err(BrokenSnapshot::PartitionImportOutsideModule {
                        name: decl.name.clone(),
                        location: record.location.to_string(),
                    });
                };
                let key = (mu.module_name.as_str(), decl.name.as_str());
                let Some(&unit) = partition_lookup.get(&key) else {
                    return Err(BrokenSnapshot::UnresolvedPartition {
                        module: mu.module_name.clone(),
                        name: decl.name.clone(),
                        location: record.location.to_string(),
                    });
                };
                importers[unit.0 as usize].push(importer);
                ImportTarget::Partition(unit)
            } else {
                // Guaranteed present after filtering; a miss here is a bug in
                // the filter, not tolerable input.
                let Some(&module_id) = module_lookup.get(&decl.name) else {
                    return Err(BrokenSnapshot::UnresolvedModule {
                        name: decl.name.clone(),
                        location: record.location.to_string(),
                    });
                };
                // Importing a module means importing its primary interface.
                let primary = modules[module_id.0 as usize].primary;
                importers[primary.0 as usize].push(importer);
                ImportTarget::Module(module_id)
            };
            imports.push(Import {
                name: decl.name.clone(),
                target,
            });
        }
        resolved.push(imports);
    }

    // Classify module units into their owning module's buckets. The primary
    // is referenced via `Module::primary` and not duplicated here.
    for (ix, record) in records.iter().enumerate() {
        let Some(mu) = &record.module else { continue };
        let Some(&module_id) = module_lookup.get(&mu.module_name) else {
            return Err(BrokenSnapshot::UnknownOwningModule {
                module: mu.module_name.clone(),
                location: record.location.to_string(),
            });
        };
        let module = &mut modules[module_id.0 as usize];
        let unit = UnitId(ix as u32);
        match mu.kind {
            ModuleUnitKind::PrimaryInterface => {}
            ModuleUnitKind::InterfacePartition => module.interface_partitions.push(unit),
            ModuleUnitKind::ImplementationPartition => {
                module.implementation_partitions.push(unit)
            }
            ModuleUnitKind::Implementation => module.implementation_units.push(unit),
        }
    }

    check_acyclic(&records, &resolved, &modules)?;

    let units: Vec<TranslationUnit> = records
        .into_iter()
        .zip(resolved)
        .zip(importers)
        .map(|((record, imports), importers)| TranslationUnit {
            location: record.location,
            imports,
            module: record.module.map(|decl| ModuleUnit {
                module_name: decl.module_name,
                kind: decl.kind,
                partition_name: decl.partition_name,
                importers,
            }),
        })
        .collect();

    Ok(ModuleGraph::new(units, modules))
}

/// The dependency views unfold shared nodes into trees, which terminates only
/// if the import relation is acyclic. A conforming C++ module graph is; an
/// analyzer that reports otherwise produced a snapshot we must not trust.
fn check_acyclic(
    records: &[UnitRecord],
    resolved: &[Vec<Import>],
    modules: &[Module],
) -> Result<(), BrokenSnapshot> {
    let mut dep_graph = DiGraph::<UnitId, ()>::with_capacity(records.len(), records.len());
    let nodes: Vec<_> = (0..records.len())
        .map(|ix| dep_graph.add_node(UnitId(ix as u32)))
        .collect();
    for (ix, imports) in resolved.iter().enumerate() {
        for import in imports {
            let target = match import.target {
                ImportTarget::Module(module_id) => modules[module_id.0 as usize].primary,
                ImportTarget::Partition(unit) => unit,
            };
            dep_graph.add_edge(nodes[ix], nodes[target.0 as usize], ());
        }
    }
    match toposort(&dep_graph, None) {
        Ok(_) => Ok(()),
        Err(cycle) => {
            let unit = dep_graph[cycle.node_id()];
            Err(BrokenSnapshot::ImportCycle {
                location: records[unit.0 as usize].location.to_string(),
            })
        }
    }
}
