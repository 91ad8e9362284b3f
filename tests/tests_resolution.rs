//! End-to-end resolution tests over the public API.

use depgraph::view;
use depgraph::{GraphError, MemoryImporter, PkgMeta, Tree};

/// A small mixed graph: an external app, two external libs sharing a dep,
/// and standard-distribution packages below them.
fn fixture() -> MemoryImporter {
    let mut importer = MemoryImporter::new();
    importer.insert(
        PkgMeta::new("github.com/acme/app").with_imports(["strings", "github.com/acme/lib"]),
    );
    importer.insert(
        PkgMeta::new("github.com/acme/lib").with_imports(["strings", "github.com/acme/util"]),
    );
    importer.insert(PkgMeta::new("github.com/acme/util").with_imports(["errors"]));
    importer.insert(PkgMeta::new("strings").internal(true).with_imports(["errors", "io"]));
    importer.insert(PkgMeta::new("errors").internal(true));
    importer.insert(PkgMeta::new("io").internal(true).with_imports(["errors"]));
    importer
}

fn resolved_tree() -> Tree {
    let mut tree = Tree::default();
    tree.importer = Some(Box::new(fixture()));
    tree.resolve("github.com/acme/app").unwrap();
    tree
}

#[test]
fn test_external_packages_expand_regardless_of_depth() {
    let tree = resolved_tree();
    let root = tree.root.as_ref().unwrap();

    let lib = &root.deps[1];
    assert_eq!(lib.name, "github.com/acme/lib");
    // util is external, two levels down, still expanded: its own import is
    // recorded as a leaf below it.
    let util = lib.deps.iter().find(|p| p.name.ends_with("util")).unwrap();
    assert!(util.resolved);
    assert!(!util.internal);
    assert_eq!(util.dep_count(), 1);
}

#[test]
fn test_shared_internal_dep_is_leaf_on_second_occurrence() {
    let tree = resolved_tree();
    let root = tree.root.as_ref().unwrap();

    // strings is first expanded directly under the root (depth-first order),
    // so the later occurrence under lib is an already-expanded leaf.
    let strings_under_root = &root.deps[0];
    let strings_under_lib = &root.deps[1].deps[0];
    assert_eq!(strings_under_root.name, "strings");
    assert_eq!(strings_under_lib.name, "strings");
    assert_eq!(strings_under_root.dep_count(), 2);
    assert_eq!(strings_under_lib.dep_count(), 0);
    // The leaf occurrence still resolved from the session's metadata cache.
    assert!(strings_under_lib.resolved);
}

#[test]
fn test_depth_invariant_holds_everywhere() {
    let tree = resolved_tree();
    let root = tree.root.as_ref().unwrap();
    assert_eq!(root.depth(), 0);

    fn check(pkg: &depgraph::Pkg) {
        for dep in &pkg.deps {
            assert_eq!(dep.depth(), pkg.depth() + 1);
            check(dep);
        }
    }
    check(root);
}

#[test]
fn test_max_depth_bounds_expansion() {
    let mut tree = Tree::default();
    tree.max_depth = 1;
    tree.importer = Some(Box::new(fixture()));
    tree.resolve("github.com/acme/app").unwrap();

    let root = tree.root.as_ref().unwrap();
    for pkg in root.iter() {
        if pkg.depth() >= 1 {
            assert_eq!(pkg.dep_count(), 0, "{} expanded beyond max depth", pkg.name);
        }
    }
}

#[test]
fn test_root_failure_is_the_sentinel_error() {
    let mut tree = Tree::default();
    tree.importer = Some(Box::new(MemoryImporter::new()));
    match tree.resolve("github.com/acme/app") {
        Err(GraphError::RootUnresolved(name)) => assert_eq!(name, "github.com/acme/app"),
        other => panic!("expected RootUnresolved, got {other:?}"),
    }
}

#[test]
fn test_invalid_matcher_fails_before_traversal() {
    let mut tree = Tree::default();
    tree.matcher = Some("(".to_string());
    tree.importer = Some(Box::new(fixture()));
    assert!(matches!(
        tree.resolve("github.com/acme/app"),
        Err(GraphError::Pattern(_))
    ));
    // Nothing was resolved.
    assert!(tree.root.is_none());
}

#[test]
fn test_view_filters_are_presentation_only() {
    let mut tree = resolved_tree();
    tree.matcher = Some("^github\\.com/".to_string());
    tree.init().unwrap();

    let visible = view::visible(&tree);
    assert!(visible.iter().all(|pkg| pkg.name.starts_with("github.com/")));

    // The underlying tree still holds the filtered nodes.
    let root = tree.root.as_ref().unwrap();
    assert!(root.iter().any(|pkg| pkg.name == "strings"));
}

#[test]
fn test_flatten_uses_stored_depths() {
    let tree = resolved_tree();
    let root = tree.root.as_ref().unwrap();

    let level1: Vec<_> = view::flatten(root, 1)
        .into_iter()
        .map(|pkg| pkg.name.clone())
        .collect();
    assert_eq!(level1, vec!["strings", "github.com/acme/lib"]);
}

#[test]
fn test_dependency_counts() {
    let tree = resolved_tree();
    let root = tree.root.as_ref().unwrap();

    assert_eq!(root.dep_count(), 2);
    // strings, errors, io, lib, strings-leaf, util, errors-leaf
    assert_eq!(root.total_dep_count(), 7);
}

#[cfg(feature = "serde")]
#[test]
fn test_resolved_tree_serializes() {
    let tree = resolved_tree();
    let json = serde_json::to_value(tree.root.as_ref().unwrap()).unwrap();
    assert_eq!(json["name"], "github.com/acme/app");
    assert!(json["deps"].as_array().is_some_and(|deps| deps.len() == 2));
}
