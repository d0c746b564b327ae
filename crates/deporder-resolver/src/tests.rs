use std::collections::BTreeMap;

use deporder_core::PackageKey;

use super::*;

fn key(name: &str) -> PackageKey {
    PackageKey::new(name, "1.0")
}

fn keys(names: &[&str]) -> Vec<PackageKey> {
    names.iter().map(|name| key(name)).collect()
}

/// Same shape as the registry's built-in table: every dependency at `1.0`.
fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<PackageKey>> {
    entries
        .iter()
        .map(|(name, deps)| (name.to_string(), keys(deps)))
        .collect()
}

fn fixture_table() -> BTreeMap<String, Vec<PackageKey>> {
    table(&[
        ("A", &["B", "C"]),
        ("B", &["D"]),
        ("C", &["D", "E"]),
        ("D", &["F"]),
        ("E", &["A"]),
        ("F", &[]),
    ])
}

fn build_from(
    available: &BTreeMap<String, Vec<PackageKey>>,
    root: PackageKey,
    max_depth: u32,
) -> GraphBuild {
    build_graph(root, max_depth, |package| {
        available.get(package.name()).cloned().unwrap_or_default()
    })
}

fn assert_dependents_precede_dependencies(graph: &DependencyGraph, order: &LoadOrder) {
    for (position, package) in order.iter().enumerate() {
        for dependency in graph.direct_dependencies(package) {
            if let Some(dependency_position) = order.position(dependency) {
                assert!(
                    dependency_position > position,
                    "{dependency} must come after {package} in {:?}",
                    order.names()
                );
            }
        }
    }
}

#[test]
fn fixture_traversal_records_every_revisit() {
    let build = build_from(&fixture_table(), key("A"), 10);

    let recorded: Vec<&PackageKey> = build.graph.iter().map(|(package, _)| package).collect();
    assert_eq!(
        recorded,
        vec![&key("A"), &key("B"), &key("D"), &key("F"), &key("C"), &key("E")]
    );
    assert_eq!(build.graph.direct_dependencies(&key("A")), keys(&["B", "C"]));
    assert_eq!(build.graph.direct_dependencies(&key("C")), keys(&["D", "E"]));
    assert_eq!(build.graph.dependencies(&key("F")), Some(&[][..]));

    let cycles: Vec<&PackageKey> = build.cycles.iter().collect();
    assert_eq!(cycles, vec![&key("D"), &key("A")]);
    assert_eq!(
        build.stats,
        TraversalStats {
            expanded: 6,
            revisits: 2,
            depth_cutoffs: 0,
        }
    );
}

#[test]
fn fixture_order_is_empty_when_root_sits_on_the_cycle() {
    let build = build_from(&fixture_table(), key("A"), 10);
    let order = load_order(&build.graph);

    assert!(order.is_empty());
    let blocked = unordered_nodes(&build.graph, &order);
    assert_eq!(blocked.len(), 6);
}

#[test]
fn fixture_at_depth_three_cuts_off_before_revisiting_root() {
    let build = build_from(&fixture_table(), key("A"), 3);

    assert!(build.cycles.contains(&key("D")));
    assert!(!build.cycles.contains(&key("A")));
    assert_eq!(build.cycles.len(), 1);
    assert_eq!(build.stats.depth_cutoffs, 2);
    assert_eq!(build.graph.dependencies(&key("F")), None);
    assert_eq!(build.graph.direct_dependencies(&key("F")), &[] as &[PackageKey]);
    assert_eq!(build.graph.direct_dependencies(&key("E")), keys(&["A"]));
}

#[test]
fn fixture_with_distinct_root_version_orders_dependents_first() {
    let root = PackageKey::new("A", "0.1.0");
    let build = build_from(&fixture_table(), root.clone(), 3);
    let order = load_order(&build.graph);

    assert_eq!(
        order.as_slice(),
        &[
            root,
            key("B"),
            key("C"),
            key("D"),
            key("E"),
            key("F"),
            key("A"),
        ]
    );
    assert_eq!(order.len(), build.graph.nodes().len());
    assert_dependents_precede_dependencies(&build.graph, &order);
}

#[test]
fn rebuilding_fixture_is_deterministic() {
    let first = build_from(&fixture_table(), key("A"), 10);
    let second = build_from(&fixture_table(), key("A"), 10);

    assert_eq!(first, second);
    assert_eq!(load_order(&first.graph), load_order(&second.graph));
}

#[test]
fn zero_depth_never_expands_root() {
    let mut fetches = 0;
    let build = build_graph(key("A"), 0, |_| {
        fetches += 1;
        keys(&["B"])
    });

    assert_eq!(fetches, 0);
    assert!(build.graph.is_empty());
    assert!(build.cycles.is_empty());
    assert_eq!(build.stats.depth_cutoffs, 1);
    assert!(load_order(&build.graph).is_empty());
}

#[test]
fn depth_one_expands_only_root() {
    let build = build_from(&fixture_table(), key("A"), 1);

    assert_eq!(build.graph.len(), 1);
    assert_eq!(build.graph.dependencies(&key("B")), None);
    assert_eq!(build.graph.dependencies(&key("C")), None);

    let order = load_order(&build.graph);
    assert_eq!(order.names(), vec!["A", "B", "C"]);
}

#[test]
fn diamond_is_reported_as_revisit_but_still_ordered() {
    let available = table(&[
        ("app", &["lib", "util"]),
        ("lib", &["core"]),
        ("util", &["core"]),
        ("core", &[]),
    ]);
    let build = build_from(&available, key("app"), 10);

    let cycles: Vec<&PackageKey> = build.cycles.iter().collect();
    assert_eq!(cycles, vec![&key("core")]);

    let order = load_order(&build.graph);
    assert_eq!(order.names(), vec!["app", "lib", "util", "core"]);
    assert_eq!(order.len(), build.graph.nodes().len());
    assert_dependents_precede_dependencies(&build.graph, &order);
}

#[test]
fn acyclic_chain_orders_every_node() {
    let available = table(&[("app", &["lib"]), ("lib", &["zlib"]), ("zlib", &[])]);
    let build = build_from(&available, key("app"), 10);

    assert!(build.cycles.is_empty());
    let order = load_order(&build.graph);
    assert_eq!(order.names(), vec!["app", "lib", "zlib"]);
}

#[test]
fn each_package_is_fetched_once() {
    let available = fixture_table();
    let mut fetched: Vec<String> = Vec::new();
    let build = build_graph(key("A"), 10, |package| {
        fetched.push(package.name().to_string());
        available.get(package.name()).cloned().unwrap_or_default()
    });

    assert_eq!(fetched, vec!["A", "B", "D", "F", "C", "E"]);
    assert_eq!(build.stats.expanded, fetched.len());
}

#[test]
fn failed_fetch_is_indistinguishable_from_leaf() {
    let with_leaf = table(&[("app", &["lib"]), ("lib", &[])]);
    let leaf_build = build_from(&with_leaf, key("app"), 10);

    // "lib" is missing from this table, standing in for a fetch that failed
    // and was collapsed to an empty list.
    let without_lib = table(&[("app", &["lib"])]);
    let failed_build = build_from(&without_lib, key("app"), 10);

    assert_eq!(leaf_build, failed_build);
    assert_eq!(load_order(&leaf_build.graph), load_order(&failed_build.graph));
}

#[test]
fn self_dependency_is_a_cycle_and_never_ordered() {
    let available = table(&[("loop", &["loop"])]);
    let build = build_from(&available, key("loop"), 10);

    assert!(build.cycles.contains(&key("loop")));
    assert!(load_order(&build.graph).is_empty());
}

#[test]
fn repeated_dependency_edges_are_kept() {
    let available = table(&[("app", &["lib", "lib"]), ("lib", &[])]);
    let build = build_from(&available, key("app"), 10);

    assert_eq!(build.graph.direct_dependencies(&key("app")), keys(&["lib", "lib"]));
    assert_eq!(build.graph.edge_count(), 2);
    assert!(build.cycles.contains(&key("lib")));

    let order = load_order(&build.graph);
    assert_eq!(order.names(), vec!["app", "lib"]);
}

#[test]
fn heavily_repeated_edge_drains_in_degree_exactly() {
    let available = table(&[
        ("app", &["lib", "lib", "lib", "core"]),
        ("lib", &["core", "core"]),
        ("core", &[]),
    ]);
    let build = build_from(&available, key("app"), 10);

    let order = load_order(&build.graph);
    assert_eq!(order.names(), vec!["app", "lib", "core"]);
    assert!(unordered_nodes(&build.graph, &order).is_empty());
}

#[test]
fn root_without_dependencies_orders_itself() {
    let available = table(&[("solo", &[])]);
    let build = build_from(&available, key("solo"), 10);

    assert_eq!(build.graph.dependencies(&key("solo")), Some(&[][..]));
    assert_eq!(load_order(&build.graph).names(), vec!["solo"]);
}

#[test]
fn same_name_with_different_versions_are_distinct_nodes() {
    let build = build_graph(PackageKey::new("app", "1.0"), 10, |package| {
        match (package.name(), package.version()) {
            ("app", _) => vec![
                PackageKey::new("log", "0.3"),
                PackageKey::new("log", "0.4"),
            ],
            _ => Vec::new(),
        }
    });

    assert!(build.cycles.is_empty());
    assert_eq!(build.stats.expanded, 3);
    let order = load_order(&build.graph);
    assert_eq!(order.len(), 3);
}

#[test]
fn order_includes_leaf_only_keys_from_hand_built_graph() {
    let graph = DependencyGraph::from_entries([
        (key("app"), keys(&["lib", "json"])),
        (key("lib"), keys(&["json"])),
    ]);

    let order = load_order(&graph);
    assert_eq!(order.names(), vec!["app", "lib", "json"]);
    assert!(unordered_nodes(&graph, &order).is_empty());
}

#[test]
fn order_seeds_independent_roots_in_first_seen_order() {
    let graph = DependencyGraph::from_entries([
        (key("cli"), keys(&["shared"])),
        (key("server"), keys(&["shared"])),
    ]);

    let order = load_order(&graph);
    assert_eq!(order.names(), vec!["cli", "server", "shared"]);
}

#[test]
fn order_omits_nodes_behind_cycle() {
    let graph = DependencyGraph::from_entries([
        (key("app"), keys(&["a"])),
        (key("a"), keys(&["b"])),
        (key("b"), keys(&["a", "leaf"])),
    ]);

    let order = load_order(&graph);
    assert_eq!(order.names(), vec!["app"]);
    assert_eq!(
        unordered_nodes(&graph, &order),
        vec![&key("a"), &key("b"), &key("leaf")]
    );
}

#[test]
fn cycle_set_ignores_duplicates() {
    let mut cycles = CycleSet::default();
    assert!(cycles.insert(key("a")));
    assert!(!cycles.insert(key("a")));
    assert!(cycles.insert(key("b")));
    assert_eq!(cycles.len(), 2);
}

#[test]
fn graph_nodes_list_each_key_once() {
    let graph = DependencyGraph::from_entries([
        (key("a"), keys(&["b", "c"])),
        (key("b"), keys(&["c"])),
    ]);

    assert_eq!(graph.nodes(), vec![&key("a"), &key("b"), &key("c")]);
    assert!(graph.contains_entry(&key("b")));
    assert!(!graph.contains_entry(&key("c")));
}
