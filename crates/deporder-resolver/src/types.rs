use std::collections::{HashMap, HashSet};

use deporder_core::PackageKey;

/// Adjacency mapping from a package to its direct dependencies.
///
/// Entries keep insertion order, which is the order packages were expanded.
/// A key with no entry was never expanded (depth cutoff), which is different
/// from an entry with an empty dependency list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    entries: Vec<(PackageKey, Vec<PackageKey>)>,
    index: HashMap<PackageKey, usize>,
}

impl DependencyGraph {
    pub fn from_entries<I, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PackageKey, D)>,
        D: IntoIterator<Item = PackageKey>,
    {
        let mut graph = Self::default();
        for (key, dependencies) in entries {
            graph.record(key, dependencies);
        }
        graph
    }

    pub(crate) fn record<D>(&mut self, key: PackageKey, dependencies: D)
    where
        D: IntoIterator<Item = PackageKey>,
    {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1.extend(dependencies),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, dependencies.into_iter().collect()));
            }
        }
    }

    /// Recorded dependency list, `None` when the package was never expanded.
    pub fn dependencies(&self, key: &PackageKey) -> Option<&[PackageKey]> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_slice())
    }

    pub fn direct_dependencies(&self, key: &PackageKey) -> &[PackageKey] {
        self.dependencies(key).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PackageKey, &[PackageKey])> {
        self.entries
            .iter()
            .map(|(key, dependencies)| (key, dependencies.as_slice()))
    }

    pub fn contains_entry(&self, key: &PackageKey) -> bool {
        self.index.contains_key(key)
    }

    /// Number of recorded entries (expanded packages).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, dependencies)| dependencies.len())
            .sum()
    }

    /// Every distinct key, whether recorded as an entry or only referenced as
    /// a dependency, in first-seen order.
    pub fn nodes(&self) -> Vec<&PackageKey> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for (key, dependencies) in &self.entries {
            for candidate in std::iter::once(key).chain(dependencies) {
                if seen.insert(candidate) {
                    nodes.push(candidate);
                }
            }
        }
        nodes
    }
}

/// Packages reached a second time during traversal, in detection order.
///
/// A shared dependency (diamond) lands here exactly like a real cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSet {
    ordered: Vec<PackageKey>,
    members: HashSet<PackageKey>,
}

impl CycleSet {
    pub fn insert(&mut self, key: PackageKey) -> bool {
        if !self.members.insert(key.clone()) {
            return false;
        }
        self.ordered.push(key);
        true
    }

    pub fn contains(&self, key: &PackageKey) -> bool {
        self.members.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageKey> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOrder {
    packages: Vec<PackageKey>,
}

impl LoadOrder {
    pub(crate) fn new(packages: Vec<PackageKey>) -> Self {
        Self { packages }
    }

    pub fn as_slice(&self) -> &[PackageKey] {
        &self.packages
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageKey> {
        self.packages.iter()
    }

    pub fn position(&self, key: &PackageKey) -> Option<usize> {
        self.packages.iter().position(|candidate| candidate == key)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.packages.iter().map(PackageKey::name).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Packages whose dependencies were fetched.
    pub expanded: usize,
    pub revisits: usize,
    pub depth_cutoffs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphBuild {
    pub graph: DependencyGraph,
    pub cycles: CycleSet,
    pub stats: TraversalStats,
}
