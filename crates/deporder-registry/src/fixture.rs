use std::collections::BTreeMap;

use deporder_core::PackageKey;

use crate::source::{DependencySource, FetchError};

/// Version reported for every dependency served by the fixture table.
pub const FIXTURE_VERSION: &str = "1.0";

/// Human-readable rendering of the built-in table, printed in test mode.
pub const FIXTURE_GRAPH_SUMMARY: &str = "A->B,C; B->D; C->D,E; D->F; E->A";

/// Order documented alongside the fixture. Informational only.
pub const FIXTURE_DOCUMENTED_ORDER: &str = "F, D, B, E, C, A";

const BUILTIN_TABLE: &[(&str, &[&str])] = &[
    ("A", &["B", "C"]),
    ("B", &["D"]),
    ("C", &["D", "E"]),
    ("D", &["F"]),
    ("E", &["A"]),
    ("F", &[]),
];

/// In-memory dependency table keyed by package name. Versions of the
/// requested package are ignored; every dependency is reported at
/// [`FIXTURE_VERSION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRegistry {
    table: BTreeMap<String, Vec<String>>,
}

impl FixtureRegistry {
    pub fn builtin() -> Self {
        Self::from_table(
            BUILTIN_TABLE
                .iter()
                .map(|(name, deps)| (*name, deps.iter().copied())),
        )
    }

    pub fn from_table<I, N, D, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = entries
            .into_iter()
            .map(|(name, deps)| (name.into(), deps.into_iter().map(Into::into).collect()))
            .collect();
        Self { table }
    }
}

impl DependencySource for FixtureRegistry {
    fn fetch_dependencies(&self, key: &PackageKey) -> Result<Vec<PackageKey>, FetchError> {
        let dependencies = self
            .table
            .get(key.name())
            .map(|deps| {
                deps.iter()
                    .map(|name| PackageKey::new(name.as_str(), FIXTURE_VERSION))
                    .collect()
            })
            .unwrap_or_default();
        Ok(dependencies)
    }
}
