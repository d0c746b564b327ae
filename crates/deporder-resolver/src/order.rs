use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};

use deporder_core::PackageKey;

use crate::types::{DependencyGraph, LoadOrder};

/// Kahn's algorithm over "depends-on" edges.
///
/// In-degree counts how many recorded edges point at a package, so a package
/// is emitted only after every package depending on it. Packages that never
/// reach zero (everything behind a cycle) are left out without error.
pub fn load_order(graph: &DependencyGraph) -> LoadOrder {
    let mut in_degree: HashMap<&PackageKey, usize> = HashMap::new();
    let mut enumeration: Vec<&PackageKey> = Vec::new();

    for (key, dependencies) in graph.iter() {
        for dependency in dependencies {
            *degree_slot(&mut in_degree, &mut enumeration, dependency) += 1;
        }
        degree_slot(&mut in_degree, &mut enumeration, key);
    }

    let mut ready: VecDeque<&PackageKey> = enumeration
        .iter()
        .copied()
        .filter(|key| in_degree.get(*key) == Some(&0))
        .collect();
    let mut ordered = Vec::with_capacity(enumeration.len());

    while let Some(next) = ready.pop_front() {
        ordered.push(next.clone());
        for dependency in graph.direct_dependencies(next) {
            let Some(degree) = in_degree.get_mut(dependency) else {
                continue;
            };
            debug_assert!(*degree > 0, "in-degree underflow for {dependency}");
            *degree -= 1;
            if *degree == 0 {
                ready.push_back(dependency);
            }
        }
    }

    LoadOrder::new(ordered)
}

/// Graph nodes missing from `order`, in first-seen order.
pub fn unordered_nodes<'a>(graph: &'a DependencyGraph, order: &LoadOrder) -> Vec<&'a PackageKey> {
    let ordered: HashSet<&PackageKey> = order.iter().collect();
    graph
        .nodes()
        .into_iter()
        .filter(|key| !ordered.contains(*key))
        .collect()
}

fn degree_slot<'a, 'm>(
    in_degree: &'m mut HashMap<&'a PackageKey, usize>,
    enumeration: &mut Vec<&'a PackageKey>,
    key: &'a PackageKey,
) -> &'m mut usize {
    match in_degree.entry(key) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            enumeration.push(key);
            entry.insert(0)
        }
    }
}
