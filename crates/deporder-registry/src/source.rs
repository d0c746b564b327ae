use deporder_core::{PackageKey, ResolveConfig};
use thiserror::Error;
use tracing::warn;

use crate::fixture::FixtureRegistry;
use crate::http_index::HttpRegistry;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("registry returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("malformed dependency payload from {url}: {source}")]
    Payload {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Answers "what does this package depend on?" for one (name, version) key.
///
/// Implementations report failures through [`FetchError`]; the traversal only
/// ever sees the collapsed form produced by [`dependencies_or_empty`].
pub trait DependencySource {
    fn fetch_dependencies(&self, key: &PackageKey) -> Result<Vec<PackageKey>, FetchError>;
}

/// Collapses a failed fetch into "no known dependencies".
pub fn dependencies_or_empty<S>(source: &S, key: &PackageKey) -> Vec<PackageKey>
where
    S: DependencySource + ?Sized,
{
    match source.fetch_dependencies(key) {
        Ok(dependencies) => dependencies,
        Err(err) => {
            warn!(
                package = key.name(),
                version = key.version(),
                reason = %err,
                "treating package as a leaf after failed dependency fetch"
            );
            Vec::new()
        }
    }
}

#[derive(Debug)]
pub enum RegistrySource {
    Fixture(FixtureRegistry),
    Http(HttpRegistry),
}

impl RegistrySource {
    pub fn from_config(config: &ResolveConfig) -> anyhow::Result<Self> {
        if config.repository.use_test_repository {
            return Ok(Self::Fixture(FixtureRegistry::builtin()));
        }

        let url = config
            .repository
            .url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("repository.url is required in live mode"))?;
        Ok(Self::Http(HttpRegistry::new(url)?))
    }

    pub fn is_fixture(&self) -> bool {
        matches!(self, Self::Fixture(_))
    }
}

impl DependencySource for RegistrySource {
    fn fetch_dependencies(&self, key: &PackageKey) -> Result<Vec<PackageKey>, FetchError> {
        match self {
            Self::Fixture(registry) => registry.fetch_dependencies(key),
            Self::Http(registry) => registry.fetch_dependencies(key),
        }
    }
}
