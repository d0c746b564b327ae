mod config;
mod package;

pub use config::{
    AnalysisSection, ConfigError, PackageSection, RepositorySection, ResolveConfig,
    DEFAULT_MAX_DEPTH,
};
pub use package::PackageKey;
