//! Post-traversal display helpers.
//!
//! Display filtering and flattening are strictly a view over the resolved
//! tree: they never exclude nodes at traversal time, so the full graph
//! structure stays available to other consumers of the same `Tree`.

use crate::graph::{Pkg, Tree};

/// The nodes sitting at exactly `level` in depth-first declaration order.
///
/// Level 0 yields the root alone. Nodes below an unexpanded leaf do not
/// exist, so a shallow tree can produce an empty listing for a deep level.
pub fn flatten(root: &Pkg, level: usize) -> Vec<&Pkg> {
    root.iter().filter(|pkg| pkg.depth() == level).collect()
}

/// Depth-first listing of the resolved tree with the tree's display filters
/// applied.
///
/// A node is listed unless the single-package filter ([`Tree::show_filter`])
/// or the name-matching pattern ([`Tree::should_filter`]) suppresses it.
/// Returns an empty listing when nothing has been resolved yet.
pub fn visible(tree: &Tree) -> Vec<&Pkg> {
    let Some(root) = &tree.root else {
        return Vec::new();
    };
    root.iter()
        .filter(|pkg| !tree.show_filter(&pkg.name) && !tree.should_filter(&pkg.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::{MemoryImporter, PkgMeta};

    fn sample_tree() -> Tree {
        let mut importer = MemoryImporter::new();
        importer.insert(PkgMeta::new("app").with_imports(["lib/a", "lib/b"]));
        importer.insert(PkgMeta::new("lib/a").with_imports(["lib/c"]));
        importer.insert(PkgMeta::new("lib/b").with_imports(["lib/c"]));
        importer.insert(PkgMeta::new("lib/c"));

        let mut tree = Tree::default();
        tree.importer = Some(Box::new(importer));
        tree.resolve("app").unwrap();
        tree
    }

    #[test]
    fn test_flatten_level_zero_is_root() {
        let tree = sample_tree();
        let level = flatten(tree.root.as_ref().unwrap(), 0);
        assert_eq!(level.len(), 1);
        assert_eq!(level[0].name, "app");
    }

    #[test]
    fn test_flatten_lists_level_in_declaration_order() {
        let tree = sample_tree();
        let level = flatten(tree.root.as_ref().unwrap(), 1);
        let names: Vec<_> = level.iter().map(|pkg| pkg.name.as_str()).collect();
        assert_eq!(names, vec!["lib/a", "lib/b"]);
    }

    #[test]
    fn test_flatten_includes_unexpanded_leaves() {
        let tree = sample_tree();
        // lib/c appears under both lib/a and lib/b; only one is expanded but
        // both occurrences are part of the level listing.
        let level = flatten(tree.root.as_ref().unwrap(), 2);
        let names: Vec<_> = level.iter().map(|pkg| pkg.name.as_str()).collect();
        assert_eq!(names, vec!["lib/c", "lib/c"]);
    }

    #[test]
    fn test_visible_applies_matcher_pattern() {
        let mut tree = sample_tree();
        tree.matcher = Some("^lib/".to_string());
        tree.init().unwrap();

        let names: Vec<_> = visible(&tree).iter().map(|pkg| pkg.name.as_str()).collect();
        // "app" does not match the pattern and is filtered out.
        assert_eq!(names, vec!["lib/a", "lib/c", "lib/b", "lib/c"]);
    }

    #[test]
    fn test_visible_applies_show_pkg_filter() {
        let mut tree = sample_tree();
        tree.show_pkg = Some("lib/c".to_string());

        let names: Vec<_> = visible(&tree).iter().map(|pkg| pkg.name.as_str()).collect();
        assert_eq!(names, vec!["lib/c", "lib/c"]);
    }

    #[test]
    fn test_visible_empty_before_resolve() {
        let tree = Tree::default();
        assert!(visible(&tree).is_empty());
    }
}
