mod fixture;
mod http_index;
mod source;

pub use fixture::{
    FixtureRegistry, FIXTURE_DOCUMENTED_ORDER, FIXTURE_GRAPH_SUMMARY, FIXTURE_VERSION,
};
pub use http_index::HttpRegistry;
pub use source::{dependencies_or_empty, DependencySource, FetchError, RegistrySource};
