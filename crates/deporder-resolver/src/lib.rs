mod build;
mod order;
mod types;

pub use build::build_graph;
pub use order::{load_order, unordered_nodes};
pub use types::{CycleSet, DependencyGraph, GraphBuild, LoadOrder, TraversalStats};

#[cfg(test)]
mod tests;
