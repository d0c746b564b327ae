use deporder_core::{PackageKey, ResolveConfig};
use deporder_registry::{dependencies_or_empty, DependencySource};
use deporder_resolver::{
    build_graph, load_order, unordered_nodes, CycleSet, LoadOrder, TraversalStats,
};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolutionReport {
    pub(crate) root: PackageKey,
    pub(crate) source_label: String,
    pub(crate) test_mode: bool,
    pub(crate) order: LoadOrder,
    pub(crate) cycles: CycleSet,
    pub(crate) unordered: Vec<PackageKey>,
    pub(crate) stats: TraversalStats,
    pub(crate) edge_count: usize,
}

pub(crate) fn resolve_report<S, F>(
    config: &ResolveConfig,
    source: &S,
    source_label: &str,
    mut on_fetch: F,
) -> ResolutionReport
where
    S: DependencySource + ?Sized,
    F: FnMut(&PackageKey),
{
    let root = config.root();
    let build = build_graph(root.clone(), config.analysis.max_depth, |package| {
        on_fetch(package);
        dependencies_or_empty(source, package)
    });
    let order = load_order(&build.graph);
    let unordered = unordered_nodes(&build.graph, &order)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();

    info!(
        root = %root,
        expanded = build.stats.expanded,
        ordered = order.len(),
        cycles = build.cycles.len(),
        "resolution finished"
    );

    ResolutionReport {
        root,
        source_label: source_label.to_string(),
        test_mode: config.repository.use_test_repository,
        edge_count: build.graph.edge_count(),
        order,
        cycles: build.cycles,
        unordered,
        stats: build.stats,
    }
}
