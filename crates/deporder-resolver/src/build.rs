use std::collections::HashSet;

use deporder_core::PackageKey;
use tracing::{debug, trace};

use crate::types::{CycleSet, DependencyGraph, GraphBuild, TraversalStats};

/// Walks the dependency relation from `root`, expanding at most `max_depth`
/// levels.
///
/// `load_dependencies` is called once per expanded package and must not fail;
/// a package it answers with an empty list is a leaf. A package reached again
/// after it was expanded is recorded in the cycle set and not re-expanded.
pub fn build_graph<F>(root: PackageKey, max_depth: u32, mut load_dependencies: F) -> GraphBuild
where
    F: FnMut(&PackageKey) -> Vec<PackageKey>,
{
    TraversalSession::new(max_depth).run(root, &mut load_dependencies)
}

struct TraversalSession {
    max_depth: u32,
    graph: DependencyGraph,
    visited: HashSet<PackageKey>,
    cycles: CycleSet,
    stats: TraversalStats,
}

impl TraversalSession {
    fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            graph: DependencyGraph::default(),
            visited: HashSet::new(),
            cycles: CycleSet::default(),
            stats: TraversalStats::default(),
        }
    }

    fn run<F>(mut self, root: PackageKey, load_dependencies: &mut F) -> GraphBuild
    where
        F: FnMut(&PackageKey) -> Vec<PackageKey>,
    {
        // Children are pushed in reverse so they pop in source order, which
        // keeps the expansion sequence identical to a recursive pre-order walk.
        let mut pending: Vec<(PackageKey, u32)> = vec![(root, 0)];

        while let Some((key, depth)) = pending.pop() {
            if depth >= self.max_depth {
                trace!(
                    package = key.name(),
                    version = key.version(),
                    depth,
                    "depth limit reached"
                );
                self.stats.depth_cutoffs += 1;
                continue;
            }

            if self.visited.contains(&key) {
                debug!(
                    package = key.name(),
                    version = key.version(),
                    "package already visited"
                );
                self.stats.revisits += 1;
                self.cycles.insert(key);
                continue;
            }
            self.visited.insert(key.clone());

            let dependencies = load_dependencies(&key);
            self.stats.expanded += 1;
            debug!(
                package = key.name(),
                version = key.version(),
                depth,
                dependencies = dependencies.len(),
                "expanded package"
            );

            pending.extend(
                dependencies
                    .iter()
                    .rev()
                    .map(|dependency| (dependency.clone(), depth + 1)),
            );
            self.graph.record(key, dependencies);
        }

        GraphBuild {
            graph: self.graph,
            cycles: self.cycles,
            stats: self.stats,
        }
    }
}
