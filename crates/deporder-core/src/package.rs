use std::fmt;

/// A node of the dependency graph: a package name paired with the literal
/// version label the dependency source reported for it.
///
/// Versions are opaque. `serde 1.0` and `serde ^1.0` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageKey {
    name: String,
    version: String,
}

impl PackageKey {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

impl<N, V> From<(N, V)> for PackageKey
where
    N: Into<String>,
    V: Into<String>,
{
    fn from((name, version): (N, V)) -> Self {
        Self::new(name, version)
    }
}
