//! Per-resolve traversal state.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::importer::PkgMeta;

/// Mutable state scoped to one `Tree::resolve` call.
///
/// A fresh session is created for every resolve, so repeated calls on the
/// same `Tree` never share cache state. Holds the expanded-name set (the sole
/// deduplication gate, which doubles as cycle protection) and the metadata
/// cache that avoids repeat importer calls for a name seen earlier in the
/// same traversal.
#[derive(Debug, Default)]
pub struct ResolveSession {
    expanded: FxHashSet<String>,
    meta: FxHashMap<String, Arc<PkgMeta>>,
}

impl ResolveSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query-and-insert over the expanded-name set.
    ///
    /// Returns whether `name` was already registered as expanded, registering
    /// it as a side effect when it was not. Only returns `false` once per
    /// name per session; callers must invoke this exactly once per candidate,
    /// at the point expansion is being decided, so that the first occurrence
    /// of a name in traversal order is the one that expands.
    pub fn mark_expanded(&mut self, name: &str) -> bool {
        if self.expanded.contains(name) {
            return true;
        }
        self.expanded.insert(name.to_string());
        false
    }

    /// Cached metadata for `name`, if an importer call for it already
    /// happened in this session.
    pub fn cached_meta(&self, name: &str) -> Option<Arc<PkgMeta>> {
        self.meta.get(name).cloned()
    }

    /// Caches `meta` under `name`.
    pub fn cache_meta(&mut self, name: String, meta: Arc<PkgMeta>) {
        self.meta.insert(name, meta);
    }
}
