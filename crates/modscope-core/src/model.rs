//! Core data structures for the module dependency graph

use serde::{Deserialize, Serialize};

/// Index of a translation unit in its owning graph's unit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Index of a module in its owning graph's module table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

/// Opaque resource identifier of a translation unit's source file.
///
/// Stable across snapshots by value equality only; a new snapshot mints new
/// unit entries even for unchanged files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location(pub String);

impl Location {
    /// Final path segment, used to label units that have no module-level name.
    pub fn basename(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What role a module unit plays within its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleUnitKind {
    PrimaryInterface,
    InterfacePartition,
    ImplementationPartition,
    Implementation,
}

impl ModuleUnitKind {
    pub fn is_partition(self) -> bool {
        matches!(
            self,
            ModuleUnitKind::InterfacePartition | ModuleUnitKind::ImplementationPartition
        )
    }

    /// Human-readable kind name shown in tree tooltips.
    pub fn display_name(self) -> &'static str {
        match self {
            ModuleUnitKind::PrimaryInterface => "Primary interface unit",
            ModuleUnitKind::InterfacePartition => "Interface partition unit",
            ModuleUnitKind::ImplementationPartition => "Non-interface partition unit",
            ModuleUnitKind::Implementation => "Implementation unit",
        }
    }
}

/// Tagged reference to an import target inside the owning graph's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportTarget {
    /// Import of a named module; presents as the module's primary interface.
    Module(ModuleId),
    /// Import of a partition of the importing unit's own module.
    Partition(UnitId),
}

/// A resolved import edge.
///
/// The target is always present: non-partition imports that could not be
/// matched to a known module are dropped before the graph is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Referenced module or partition name, dotted form.
    pub name: String,
    pub target: ImportTarget,
}

impl Import {
    pub fn is_partition(&self) -> bool {
        matches!(self.target, ImportTarget::Partition(_))
    }
}

/// Metadata carried by translation units that contribute to a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleUnit {
    /// Dotted name of the owning module.
    pub module_name: String,
    pub kind: ModuleUnitKind,
    /// Present iff `kind` is a partition kind.
    pub partition_name: Option<String>,
    /// Units whose retained imports resolve to this unit. Derived during
    /// resolution as the symmetric closure of `imports`; not an independent
    /// source of truth.
    pub importers: Vec<UnitId>,
}

/// A compiled source file, module unit or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub location: Location,
    /// Retained imports in declaration order. Order matters for display only.
    pub imports: Vec<Import>,
    /// `Some` iff this translation unit is a module unit.
    pub module: Option<ModuleUnit>,
}

impl TranslationUnit {
    pub fn is_module_unit(&self) -> bool {
        self.module.is_some()
    }
}

/// A named C++ module: one primary interface plus its owned units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub primary: UnitId,
    pub interface_partitions: Vec<UnitId>,
    pub implementation_partitions: Vec<UnitId>,
    pub implementation_units: Vec<UnitId>,
}

impl Module {
    /// Number of units contributing to this module, primary included.
    pub fn unit_count(&self) -> usize {
        1 + self.interface_partitions.len()
            + self.implementation_partitions.len()
            + self.implementation_units.len()
    }
}

/// One fully resolved snapshot of the module dependency structure.
///
/// Built in a single resolution pass and never mutated afterward; each
/// snapshot replaces the previous graph wholesale. The epoch is stamped by
/// the store on publication, so handles minted against an older graph are
/// recognizably stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGraph {
    epoch: u64,
    units: Vec<TranslationUnit>,
    modules: Vec<Module>,
}

impl ModuleGraph {
    pub(crate) fn new(units: Vec<TranslationUnit>, modules: Vec<Module>) -> Self {
        ModuleGraph {
            epoch: 0,
            units,
            modules,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn stamp_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }

    pub fn unit(&self, id: UnitId) -> Option<&TranslationUnit> {
        self.units.get(id.0 as usize)
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.0 as usize)
    }

    /// Iterate over all translation units in snapshot order.
    pub fn units(&self) -> impl Iterator<Item = (UnitId, &TranslationUnit)> {
        self.units
            .iter()
            .enumerate()
            .map(|(ix, unit)| (UnitId(ix as u32), unit))
    }

    /// Iterate over all modules in snapshot order.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(ix, module)| (ModuleId(ix as u32), module))
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Canonical name of a translation unit for the dependency views.
///
/// Implementation units all share their module's name, so they (and
/// non-module units) are named by their source file instead.
pub fn unit_name(unit: &TranslationUnit) -> String {
    match &unit.module {
        Some(mu) => match mu.kind {
            ModuleUnitKind::PrimaryInterface => mu.module_name.clone(),
            ModuleUnitKind::InterfacePartition | ModuleUnitKind::ImplementationPartition => {
                format!(
                    "{}:{}",
                    mu.module_name,
                    mu.partition_name.as_deref().unwrap_or_default()
                )
            }
            ModuleUnitKind::Implementation => unit.location.basename().to_string(),
        },
        None => unit.location.basename().to_string(),
    }
}

/// Name of a unit relative to its owning module; partitions shorten to
/// `:partition`.
pub fn unit_local_name(unit: &TranslationUnit) -> String {
    if let Some(mu) = &unit.module {
        if mu.kind.is_partition() {
            return format!(":{}", mu.partition_name.as_deref().unwrap_or_default());
        }
    }
    unit_name(unit)
}

/// Display form of [`unit_name`]. The colon gets a leading space so it stays
/// visible next to proportional glyphs.
pub fn unit_display_name(unit: &TranslationUnit) -> String {
    unit_name(unit).replace(':', " :")
}

/// Display form of [`unit_local_name`].
pub fn unit_local_display_name(unit: &TranslationUnit) -> String {
    unit_local_name(unit)
}
