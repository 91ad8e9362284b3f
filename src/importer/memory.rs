//! In-memory importer for tests and embedders.

use std::path::Path;

use indexmap::IndexMap;

use super::{ImportError, ImportMode, Importer, PkgMeta};

/// An importer over a fixed name → metadata table.
///
/// Lookups ignore the source directory and import mode; unknown names report
/// [`ImportError::NotFound`]. Insertion order is preserved.
#[derive(Debug, Default)]
pub struct MemoryImporter {
    pkgs: IndexMap<String, PkgMeta>,
}

impl MemoryImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `meta` under its import path, replacing any previous entry.
    pub fn insert(&mut self, meta: PkgMeta) -> &mut Self {
        self.pkgs.insert(meta.import_path.clone(), meta);
        self
    }

    /// Number of registered packages.
    pub fn len(&self) -> usize {
        self.pkgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pkgs.is_empty()
    }
}

impl Importer for MemoryImporter {
    fn import(&self, name: &str, _src_dir: &Path, _mode: ImportMode) -> Result<PkgMeta, ImportError> {
        self.pkgs
            .get(name)
            .cloned()
            .ok_or_else(|| ImportError::NotFound(name.to_string()))
    }
}
