//! Source enumeration used to seed the analyzer.

use std::path::Path;

use anyhow::Result;
use ignore::WalkBuilder;
use modscope_core::Location;
use tracing::debug;

/// File extensions treated as translation-unit candidates.
pub const TRANSLATION_UNIT_EXTENSIONS: &[&str] = &[
    "cpp", "cppm", "mpp", "ipp", "cxx", "cxxm", "mxx", "ixx", "cc",
];

/// Enumerate candidate translation units under a root.
///
/// Only the interface matters to the analyzer; how the walk happens is this
/// side's business.
pub trait SourceEnumerator {
    fn enumerate(&self, root: &Path) -> Result<Vec<Location>>;
}

/// Filesystem-backed enumerator. Hidden entries and ignore-file rules are
/// skipped during the walk.
pub struct FsEnumerator;

impl SourceEnumerator for FsEnumerator {
    fn enumerate(&self, root: &Path) -> Result<Vec<Location>> {
        let mut locations = Vec::new();
        for entry in WalkBuilder::new(root).build() {
            let entry = entry?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
                continue;
            };
            if TRANSLATION_UNIT_EXTENSIONS.contains(&ext) {
                locations.push(Location(path.to_string_lossy().into_owned()));
            }
        }
        debug!(
            count = locations.len(),
            root = %root.display(),
            "enumerated translation units"
        );
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn picks_up_translation_unit_extensions_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/app.cppm");
        touch(dir.path(), "src/detail/impl.cpp");
        touch(dir.path(), "src/io.ixx");
        touch(dir.path(), "include/app.hpp");
        touch(dir.path(), "README.md");

        let mut found = FsEnumerator.enumerate(dir.path()).unwrap();
        found.sort_by(|a, b| a.0.cmp(&b.0));

        let names: Vec<&str> = found.iter().map(|loc| loc.basename()).collect();
        assert_eq!(names, vec!["app.cppm", "impl.cpp", "io.ixx"]);
    }

    #[test]
    fn skips_hidden_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".cache/generated.cpp");
        touch(dir.path(), "src/main.cpp");

        let found = FsEnumerator.enumerate(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].basename(), "main.cpp");
    }

    #[test]
    fn empty_root_yields_no_candidates() {
        let dir = TempDir::new().unwrap();
        assert!(FsEnumerator.enumerate(dir.path()).unwrap().is_empty());
    }
}
