//! The tree configuration and traversal-policy object.

use regex::Regex;

use super::error::GraphError;
use super::pkg::Pkg;
use super::session::ResolveSession;
use crate::importer::{HostImporter, Importer};

/// Configuration and policy for one dependency graph.
///
/// Callers set the public fields, then call [`Tree::resolve`]. A `Tree` is
/// reusable: every resolve builds a fresh root and fresh session caches, so
/// repeated calls never share state. It is not safe to drive concurrent
/// resolves through one instance; use separate trees instead.
///
/// ```
/// use depgraph::{MemoryImporter, PkgMeta, Tree};
///
/// let mut importer = MemoryImporter::new();
/// importer.insert(PkgMeta::new("app").with_imports(["lib"]));
/// importer.insert(PkgMeta::new("lib"));
///
/// let mut tree = Tree::default();
/// tree.max_depth = 4;
/// tree.importer = Some(Box::new(importer));
/// tree.resolve("app").unwrap();
/// assert!(tree.root.as_ref().unwrap().resolved);
/// ```
#[derive(Default)]
pub struct Tree {
    /// The resolved root node, populated by [`Tree::resolve`].
    pub root: Option<Pkg>,

    /// Expand internal (standard distribution) packages beyond the first
    /// level below the root.
    pub resolve_internal: bool,
    /// Include each package's declared test imports alongside its build
    /// imports.
    pub resolve_test: bool,
    /// Maximum node depth to expand at; 0 disables the limit.
    pub max_depth: usize,
    /// Depth at which [`crate::view::flatten`] lists the tree.
    pub map_level: usize,
    /// When set, [`Tree::show_filter`] suppresses every name but this one.
    pub show_pkg: Option<String>,
    /// Optional name-matching pattern; names that do NOT match are filtered.
    pub matcher: Option<String>,

    /// Importer to resolve package metadata with. [`HostImporter`] is
    /// supplied on first resolve when unset.
    pub importer: Option<Box<dyn Importer>>,

    compiled: Option<Regex>,
}

impl Tree {
    /// Compiles the name-matching pattern, if one is configured.
    ///
    /// An invalid pattern is a configuration error and fails here, before
    /// any traversal. Called implicitly by [`Tree::resolve`]; calling it
    /// again after changing `matcher` recompiles.
    pub fn init(&mut self) -> Result<(), GraphError> {
        self.compiled = match &self.matcher {
            Some(pattern) => Some(Regex::new(pattern)?),
            None => None,
        };
        Ok(())
    }

    /// Recursively resolves the dependency graph rooted at `name`.
    ///
    /// The current working directory is used as the source directory for the
    /// root lookup only. Returns [`GraphError::RootUnresolved`] when the root
    /// package itself cannot be imported; importer failures below the root
    /// surface as unresolved leaf nodes instead.
    pub fn resolve(&mut self, name: &str) -> Result<(), GraphError> {
        self.init()?;

        let src_dir = std::env::current_dir().map_err(GraphError::WorkingDir)?;
        let importer = self
            .importer
            .take()
            .unwrap_or_else(|| Box::new(HostImporter::new()));

        let mut session = ResolveSession::new();
        // The root is the first expansion of the session.
        session.mark_expanded(name);

        let mut root = Pkg::root(name, src_dir);
        root.resolve(importer.as_ref(), self, &mut session);
        tracing::debug!(
            name = %root.name,
            resolved = root.resolved,
            deps = root.total_dep_count(),
            "resolve finished"
        );

        self.importer = Some(importer);
        let resolved = root.resolved;
        self.root = Some(root);

        if !resolved {
            return Err(GraphError::RootUnresolved(name.to_string()));
        }
        Ok(())
    }

    /// Whether internal packages below `parent` should be expanded.
    ///
    /// The root's own first-level dependencies are always expanded, so a
    /// caller sees them regardless of origin; beyond that, internal packages
    /// are expanded only when `resolve_internal` is set. This bounds default
    /// output size without hiding the root's direct footprint.
    pub fn should_resolve_internal(&self, parent: &Pkg) -> bool {
        if self.resolve_internal {
            return true;
        }
        parent.depth() == 0
    }

    /// Whether `pkg` sits at or beyond the configured depth limit.
    ///
    /// Never true when `max_depth` is 0.
    pub fn is_at_max_depth(&self, pkg: &Pkg) -> bool {
        if self.max_depth == 0 {
            return false;
        }
        pkg.depth() >= self.max_depth
    }

    /// Whether `name` is excluded by the name-matching pattern.
    ///
    /// Inverted sense: matching the pattern means "keep", so a configured
    /// pattern filters every name that does NOT match. With no pattern,
    /// nothing is filtered.
    pub fn should_filter(&self, name: &str) -> bool {
        match &self.compiled {
            Some(matcher) => !matcher.is_match(name),
            None => false,
        }
    }

    /// Whether `name` is suppressed by the single-package display filter.
    ///
    /// With `show_pkg` set, every name except the chosen one is suppressed
    /// (true); with it unset, nothing is.
    pub fn show_filter(&self, name: &str) -> bool {
        match &self.show_pkg {
            Some(show) => name != show.as_str(),
            None => false,
        }
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("resolve_internal", &self.resolve_internal)
            .field("resolve_test", &self.resolve_test)
            .field("max_depth", &self.max_depth)
            .field("map_level", &self.map_level)
            .field("show_pkg", &self.show_pkg)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}
