//! Importer backed by the host Go workspace layout.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use super::{ImportError, ImportMode, Importer, PkgMeta};

// `import "fmt"`, `import f "fmt"`, `import . "fmt"`, `import _ "fmt"`
static SINGLE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^import\s+(?:[A-Za-z_.][A-Za-z0-9_.]*\s+)?"([^"]+)""#).expect("static pattern")
});

// One entry inside an `import ( ... )` block, with optional alias.
static BLOCK_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:[A-Za-z_.][A-Za-z0-9_.]*\s+)?"([^"]+)""#).expect("static pattern")
});

/// Locates packages in the host Go workspace and reads their import
/// declarations.
///
/// A package directory is resolved by trying, in order:
///
/// 1. the path itself relative to `src_dir` (for `./` and `../` imports)
/// 2. `$GOROOT/src/<name>` — a hit marks the package internal
/// 3. `<src_dir>/vendor/<name>`
/// 4. `<gopath>/src/<name>` for each `$GOPATH` entry
///
/// Only import declarations are read from the located source files; bodies
/// are never parsed.
pub struct HostImporter {
    goroot: Option<PathBuf>,
    gopaths: Vec<PathBuf>,
}

impl HostImporter {
    /// Creates an importer configured from the `GOROOT` and `GOPATH`
    /// environment variables.
    pub fn new() -> Self {
        let goroot = std::env::var_os("GOROOT").map(PathBuf::from);
        let gopaths = std::env::var_os("GOPATH")
            .map(|raw| std::env::split_paths(&raw).collect())
            .unwrap_or_default();
        Self { goroot, gopaths }
    }

    /// Creates an importer with explicit workspace roots, ignoring the
    /// environment.
    pub fn with_roots(goroot: Option<PathBuf>, gopaths: Vec<PathBuf>) -> Self {
        Self { goroot, gopaths }
    }

    /// Resolves the directory for `name`, and whether it is internal.
    fn locate(&self, name: &str, src_dir: &Path) -> Option<(PathBuf, bool)> {
        if name.starts_with("./") || name.starts_with("../") {
            let dir = src_dir.join(name);
            return dir.is_dir().then_some((dir, false));
        }

        if let Some(goroot) = &self.goroot {
            let dir = goroot.join("src").join(name);
            if dir.is_dir() {
                return Some((dir, true));
            }
        }

        let vendored = src_dir.join("vendor").join(name);
        if vendored.is_dir() {
            return Some((vendored, false));
        }

        for gopath in &self.gopaths {
            let dir = gopath.join("src").join(name);
            if dir.is_dir() {
                return Some((dir, false));
            }
        }

        None
    }
}

impl Importer for HostImporter {
    fn import(&self, name: &str, src_dir: &Path, _mode: ImportMode) -> Result<PkgMeta, ImportError> {
        let (dir, internal) = self
            .locate(name, src_dir)
            .ok_or_else(|| ImportError::NotFound(name.to_string()))?;

        let mut meta = PkgMeta::new(name).in_dir(&dir).internal(internal);
        let mut imports: IndexSet<String> = IndexSet::new();
        let mut test_imports: IndexSet<String> = IndexSet::new();

        for file_name in go_files(&dir)? {
            let source = fs::read_to_string(dir.join(&file_name)).map_err(|source| {
                ImportError::Io {
                    dir: dir.clone(),
                    source,
                }
            })?;
            let test = file_name.ends_with("_test.go");
            for import in declared_imports(&source) {
                // cgo pseudo-package, nothing to resolve
                if import == "C" {
                    continue;
                }
                if test {
                    test_imports.insert(import);
                } else {
                    imports.insert(import);
                }
            }
            if test {
                meta.test_files.push(file_name);
            } else {
                meta.files.push(file_name);
            }
        }

        if meta.files.is_empty() && meta.test_files.is_empty() {
            return Err(ImportError::NoSources(dir));
        }

        meta.imports = imports.into_iter().collect();
        meta.test_imports = test_imports.into_iter().collect();
        Ok(meta)
    }
}

impl Default for HostImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lists the buildable `.go` file names directly in `dir`, sorted for
/// deterministic import order.
fn go_files(dir: &Path) -> Result<Vec<String>, ImportError> {
    let entries = fs::read_dir(dir).map_err(|source| ImportError::Io {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ImportError::Io {
            dir: dir.to_path_buf(),
            source,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        if file_name.ends_with(".go") && !file_name.starts_with('.') && !file_name.starts_with('_')
        {
            names.push(file_name);
        }
    }
    names.sort();
    Ok(names)
}

/// Extracts the import paths declared at the top of a Go source file, in
/// declaration order.
///
/// Handles both single-import lines and parenthesized import blocks. Scanning
/// stops at the first top-level declaration, where imports can no longer
/// appear.
fn declared_imports(source: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut in_block = false;

    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if in_block {
            if line.starts_with(')') {
                in_block = false;
            } else if let Some(caps) = BLOCK_ENTRY.captures(line) {
                out.push(caps[1].to_string());
            }
            continue;
        }

        if line.starts_with("import (") {
            in_block = true;
            continue;
        }
        if let Some(caps) = SINGLE_IMPORT.captures(line) {
            out.push(caps[1].to_string());
            continue;
        }
        if line.starts_with("func ")
            || line.starts_with("var ")
            || line.starts_with("const ")
            || line.starts_with("type ")
        {
            break;
        }
    }

    out
}
