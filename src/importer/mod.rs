//! The package-metadata lookup capability.
//!
//! The graph core never touches the filesystem itself; everything it knows
//! about a package comes through the [`Importer`] trait. Two implementations
//! are provided:
//!
//! - [`HostImporter`] — locates packages in the host Go workspace layout
//!   (GOROOT, vendor directories, GOPATH entries) and reads import
//!   declarations from their source files.
//! - [`MemoryImporter`] — an in-memory name → metadata table, for tests and
//!   embedders that already know their graph.

mod host;
mod memory;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use host::HostImporter;
pub use memory::MemoryImporter;

/// The context an import lookup is happening in.
///
/// `Test` is used when the package name was declared by a test file; importers
/// may ignore it, but custom implementations can use it to apply different
/// lookup rules for test-only dependencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportMode {
    Normal,
    Test,
}

/// Errors produced while locating or reading a package.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The package could not be located anywhere the importer searches.
    #[error("unable to locate package `{0}`")]
    NotFound(String),

    /// The package directory exists but could not be read.
    #[error("failed to read package directory {}: {source}", .dir.display())]
    Io {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The located directory contains no buildable source files.
    #[error("no buildable source files in {}", .0.display())]
    NoSources(PathBuf),
}

/// Metadata for a single package, as reported by an [`Importer`].
///
/// Import lists are deduplicated per package while preserving
/// first-occurrence declaration order, and never contain the `"C"`
/// pseudo-package.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PkgMeta {
    /// Resolved import path for the package.
    pub import_path: String,
    /// Directory the package's source files live in.
    pub dir: PathBuf,
    /// True iff the package belongs to the standard/base distribution.
    pub internal: bool,
    /// Build file names (no test files), in directory order.
    pub files: Vec<String>,
    /// Test file names, in directory order.
    pub test_files: Vec<String>,
    /// Direct imports declared by the build files, in declaration order.
    pub imports: Vec<String>,
    /// Direct imports declared only by the test files, in declaration order.
    pub test_imports: Vec<String>,
}

impl PkgMeta {
    /// Creates empty metadata for `import_path`.
    pub fn new(import_path: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            dir: PathBuf::new(),
            internal: false,
            files: Vec::new(),
            test_files: Vec::new(),
            imports: Vec::new(),
            test_imports: Vec::new(),
        }
    }

    /// Sets the internal (standard distribution) flag.
    pub fn internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    /// Sets the package directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Sets the non-test import list.
    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the test-only import list.
    pub fn with_test_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_imports = imports.into_iter().map(Into::into).collect();
        self
    }
}

/// A type that can locate a package and report its metadata.
pub trait Importer {
    /// Looks up `name`, using `src_dir` as the base for relative and vendor
    /// lookups, and returns the package's metadata.
    fn import(&self, name: &str, src_dir: &Path, mode: ImportMode) -> Result<PkgMeta, ImportError>;
}
