use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::package::PackageKey;

pub const DEFAULT_MAX_DEPTH: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("package.name must not be empty")]
    EmptyPackageName,

    #[error("package.version must not be empty")]
    EmptyPackageVersion,

    #[error("repository.url is required when repository.use_test_repository is false")]
    MissingRepositoryUrl,

    #[error("repository.url must start with http:// or https://: {url}")]
    UnsupportedRepositoryUrl { url: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolveConfig {
    pub package: PackageSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub repository: RepositorySection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageSection {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisSection {
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositorySection {
    #[serde(default)]
    pub use_test_repository: bool,
    pub url: Option<String>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

impl ResolveConfig {
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse deporder config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Checks the invariants serde cannot express. Called again by callers
    /// that mutate a loaded config (command-line overrides).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package.name.trim().is_empty() {
            return Err(ConfigError::EmptyPackageName);
        }
        if self.package.version.trim().is_empty() {
            return Err(ConfigError::EmptyPackageVersion);
        }
        if self.repository.use_test_repository {
            return Ok(());
        }

        let Some(url) = self.repository.url.as_deref().map(str::trim) else {
            return Err(ConfigError::MissingRepositoryUrl);
        };
        if url.is_empty() {
            return Err(ConfigError::MissingRepositoryUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::UnsupportedRepositoryUrl {
                url: url.to_string(),
            });
        }

        Ok(())
    }

    pub fn root(&self) -> PackageKey {
        PackageKey::new(self.package.name.trim(), self.package.version.trim())
    }
}
