pub mod dependency_graph;
pub mod package;

pub use dependency_graph::DependencyGraph;
pub use package::{Dependency, DependencyRecord, Package, PackageName, PackageRecord, UsedBy, Version};
