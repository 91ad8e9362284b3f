//! The package node model and the recursive resolution algorithm.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexSet;

use super::session::ResolveSession;
use super::tree::Tree;
use crate::importer::{ImportMode, Importer, PkgMeta};

/// One package in the dependency graph.
///
/// A node owns its children exclusively; depth is assigned at construction
/// (root = 0, child = parent + 1) and the tree is never mutated after a
/// resolve, so it cannot go stale.
///
/// Resolution and expansion are orthogonal: a node is *resolved* when the
/// importer produced metadata for it, and *expanded* when its own imports
/// were recursed into. A resolved node may intentionally be left unexpanded
/// (duplicate name, depth limit, internal policy) and still reads as a valid
/// leaf.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pkg {
    /// Import path, as given by the caller or rewritten to the importer's
    /// resolved path once metadata is available.
    pub name: String,
    /// Directory used as the base for this node's import lookup.
    pub src_dir: PathBuf,
    /// Constructed in a test-import context.
    pub test: bool,
    /// Part of the standard/base distribution (known once resolved).
    pub internal: bool,
    /// True iff the importer produced metadata for this name.
    pub resolved: bool,
    /// Direct dependencies, in importer-reported order: non-test imports
    /// first, then test imports when enabled.
    pub deps: Vec<Pkg>,
    depth: usize,
}

impl Pkg {
    /// Creates an unresolved root node. Depth 0, non-test.
    pub fn root(name: impl Into<String>, src_dir: impl Into<PathBuf>) -> Self {
        Self::new(name, src_dir, false, 0)
    }

    pub(crate) fn new(
        name: impl Into<String>,
        src_dir: impl Into<PathBuf>,
        test: bool,
        depth: usize,
    ) -> Self {
        Self {
            name: name.into(),
            src_dir: src_dir.into(),
            test,
            internal: false,
            resolved: false,
            deps: Vec::new(),
            depth,
        }
    }

    /// Distance from the root. 0 for the root itself.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Number of direct dependencies.
    pub fn dep_count(&self) -> usize {
        self.deps.len()
    }

    /// Number of nodes in the subtree below this one.
    pub fn total_dep_count(&self) -> usize {
        self.deps
            .iter()
            .map(|dep| 1 + dep.total_dep_count())
            .sum()
    }

    /// Resolves this node's metadata and recursively resolves its
    /// dependencies, consulting `tree` for every policy decision.
    ///
    /// Importer failures are recorded locally (`resolved = false`, empty
    /// `deps`) and never escalated; the caller decides whether an unresolved
    /// node is fatal (it is only for the root).
    pub fn resolve(&mut self, importer: &dyn Importer, tree: &Tree, session: &mut ResolveSession) {
        let Some(meta) = self.resolve_meta(importer, session) else {
            return;
        };
        self.populate_deps(importer, tree, session, &meta);
    }

    /// Metadata-only resolution: session cache first, then the importer.
    fn resolve_meta(
        &mut self,
        importer: &dyn Importer,
        session: &mut ResolveSession,
    ) -> Option<Arc<PkgMeta>> {
        let meta = match session.cached_meta(&self.name) {
            Some(meta) => meta,
            None => {
                let mode = if self.test {
                    ImportMode::Test
                } else {
                    ImportMode::Normal
                };
                match importer.import(&self.name, &self.src_dir, mode) {
                    Ok(meta) => {
                        let meta = Arc::new(meta);
                        session.cache_meta(self.name.clone(), Arc::clone(&meta));
                        meta
                    }
                    Err(err) => {
                        tracing::debug!(name = %self.name, error = %err, "leaving node unresolved");
                        self.resolved = false;
                        return None;
                    }
                }
            }
        };

        self.resolved = true;
        self.name = meta.import_path.clone();
        self.internal = meta.internal;
        Some(meta)
    }

    /// Constructs a child per candidate import and decides, per child,
    /// whether to expand it.
    fn populate_deps(
        &mut self,
        importer: &dyn Importer,
        tree: &Tree,
        session: &mut ResolveSession,
        meta: &PkgMeta,
    ) {
        let mut candidates: Vec<(&str, bool)> = meta
            .imports
            .iter()
            .map(|name| (name.as_str(), false))
            .collect();
        // A package's own test imports are considered only at the point its
        // declared test files are read, never transitively.
        if tree.resolve_test && !self.test {
            candidates.extend(meta.test_imports.iter().map(|name| (name.as_str(), true)));
        }

        let mut listed: IndexSet<&str> = IndexSet::new();
        for (name, test) in candidates {
            // self-imports and repeats within one import list
            if name == self.name || !listed.insert(name) {
                continue;
            }

            let mut dep = Pkg::new(name, meta.dir.as_path(), test, self.depth + 1);

            let seen = session.mark_expanded(name);
            let Some(dep_meta) = dep.resolve_meta(importer, session) else {
                self.deps.push(dep);
                continue;
            };

            let expand = !seen
                && !tree.is_at_max_depth(&dep)
                && (!dep.internal || tree.should_resolve_internal(self));
            if expand {
                dep.populate_deps(importer, tree, session, &dep_meta);
            }

            self.deps.push(dep);
        }
    }

    /// Depth-first iteration over this node and its subtree, in declaration
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = &Pkg> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.deps.iter().rev());
            Some(next)
        })
    }
}
