//! # depgraph
//!
//! Core library for resolving a source package's transitive import
//! dependency graph.
//!
//! Starting from a root package name, the resolver discovers every package it
//! imports, recursively, down to a configurable depth. Each distinct package
//! name is expanded at most once per resolve (first occurrence in depth-first
//! declaration order wins); later occurrences are recorded as leaves. This
//! global deduplication doubles as cycle protection.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! view      → post-traversal display helpers (flattening, name filters)
//!   ↓
//! graph     → Pkg/Tree model, recursive resolution, per-call session caches
//!   ↓
//! importer  → Importer capability, host + in-memory implementations
//! ```
//!
//! ## Example
//!
//! ```
//! use depgraph::{MemoryImporter, PkgMeta, Tree};
//!
//! let mut importer = MemoryImporter::new();
//! importer.insert(PkgMeta::new("strings").with_imports(["errors", "io"]));
//! importer.insert(PkgMeta::new("errors").internal(true));
//! importer.insert(PkgMeta::new("io").internal(true));
//!
//! let mut tree = Tree::default();
//! tree.importer = Some(Box::new(importer));
//! tree.resolve("strings").unwrap();
//!
//! let root = tree.root.as_ref().unwrap();
//! assert_eq!(root.dep_count(), 2);
//! ```

/// Importer capability: package metadata lookup, host + in-memory backends
pub mod importer;

/// Graph core: Pkg node model, Tree policy object, recursive resolution
pub mod graph;

/// Post-traversal display helpers: flattening, name filters
pub mod view;

// Re-export the primary surface
pub use graph::{GraphError, Pkg, ResolveSession, Tree};
pub use importer::{HostImporter, ImportError, ImportMode, Importer, MemoryImporter, PkgMeta};
