use crate::graph_analysis::domain::{DependencyGraph, Package};
use crate::shared::error::GraphError;
use std::collections::HashSet;

/// Number of dotted segments in a "main" package name (`Vendor.Product.Area`)
const MAIN_PACKAGE_SEGMENTS: usize = 3;

/// Inbound and outbound edge counts of one package, over current edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDegree {
    pub name: String,
    /// Dependency entries elsewhere in the graph that point at this package
    pub inbound: usize,
    /// Current dependency entries of this package
    pub outbound: usize,
}

/// Version spread among the consumers of one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDivergence {
    pub name: String,
    pub version: String,
    pub usage_count: usize,
    /// Distinct declared versions, in first-seen order
    pub declared_versions: Vec<String>,
    /// True if a consumer declared a different leading version segment
    pub version_mismatch: bool,
}

impl VersionDivergence {
    pub fn distinct_version_count(&self) -> usize {
        self.declared_versions.len()
    }
}

/// A dependency entry naming a package that is not part of the graph
///
/// Informational only; such references are legal and never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub consumer: String,
    pub dependency: String,
    pub declared_version: String,
}

/// Read-only aggregations over a graph snapshot
///
/// Pre- and post-reduction statistics differ, so callers construct one
/// instance per snapshot they want to describe.
pub struct GraphStatistics<'a> {
    graph: &'a DependencyGraph,
}

impl<'a> GraphStatistics<'a> {
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self { graph }
    }

    pub fn count(&self) -> usize {
        self.graph.len()
    }

    /// Packages counted by distinct (case-insensitive) name; differs from
    /// [`GraphStatistics::count`] only if the builder let a duplicate through
    pub fn distinct_name_count(&self) -> usize {
        self.graph
            .packages()
            .map(|p| p.name().key())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Packages whose name has exactly three dotted segments
    pub fn main_package_count(&self) -> usize {
        self.graph
            .packages()
            .filter(|p| p.name().segment_count() == MAIN_PACKAGE_SEGMENTS)
            .count()
    }

    /// Mean number of current dependency entries per package
    ///
    /// # Errors
    /// `EmptyGraph` if the graph has no packages
    pub fn average_dependency_count(&self) -> Result<f64, GraphError> {
        self.mean("average dependency count", Package::dependency_count)
    }

    /// Mean number of consumers per package
    ///
    /// # Errors
    /// `EmptyGraph` if the graph has no packages
    pub fn average_usage_count(&self) -> Result<f64, GraphError> {
        self.mean("average usage count", Package::usage_count)
    }

    /// Index `i` holds the number of packages with exactly `i` consumers,
    /// for `i` from 0 to the observed maximum. Empty for an empty graph.
    pub fn usage_histogram(&self) -> Vec<usize> {
        let Some(max) = self.graph.packages().map(Package::usage_count).max() else {
            return Vec::new();
        };

        let mut histogram = vec![0; max + 1];
        for package in self.graph.packages() {
            histogram[package.usage_count()] += 1;
        }
        histogram
    }

    /// The `n` most used packages; ties keep insertion order
    ///
    /// # Errors
    /// `EmptyGraph` if the graph has no packages
    pub fn top_n_by_usage(&self, n: usize) -> Result<Vec<&'a Package>, GraphError> {
        self.ensure_not_empty("top packages by usage")?;

        let mut packages: Vec<&'a Package> = self.graph.packages().collect();
        packages.sort_by(|a, b| b.usage_count().cmp(&a.usage_count()));
        packages.truncate(n);
        Ok(packages)
    }

    /// The `n` packages whose consumers declared the most distinct versions;
    /// ties keep insertion order
    ///
    /// # Errors
    /// `EmptyGraph` if the graph has no packages
    pub fn top_n_by_version_divergence(&self, n: usize) -> Result<Vec<VersionDivergence>, GraphError> {
        self.ensure_not_empty("top packages by version divergence")?;

        let mut divergences: Vec<VersionDivergence> =
            self.graph.packages().map(Self::divergence_of).collect();
        divergences.sort_by(|a, b| b.distinct_version_count().cmp(&a.distinct_version_count()));
        divergences.truncate(n);
        Ok(divergences)
    }

    /// Inbound/outbound counts per package in insertion order, for renderers
    pub fn node_degrees(&self) -> Vec<PackageDegree> {
        let mut inbound = vec![0usize; self.graph.len()];
        for package in self.graph.packages() {
            for dependency in package.dependencies() {
                if let Some(index) = self.graph.index_of(dependency.name().key()) {
                    inbound[index] += 1;
                }
            }
        }

        self.graph
            .packages()
            .zip(inbound)
            .map(|(package, inbound)| PackageDegree {
                name: package.name().to_string(),
                inbound,
                outbound: package.dependency_count(),
            })
            .collect()
    }

    /// Dependency entries that do not resolve to a package of the graph
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        self.graph
            .packages()
            .flat_map(|package| {
                package
                    .dependencies()
                    .iter()
                    .filter(|d| self.graph.resolve(d).is_none())
                    .map(move |d| UnresolvedReference {
                        consumer: package.name().to_string(),
                        dependency: d.name().to_string(),
                        declared_version: d.version().to_string(),
                    })
            })
            .collect()
    }

    fn divergence_of(package: &Package) -> VersionDivergence {
        let mut declared_versions: Vec<String> = Vec::new();
        for usage in package.used_by() {
            let declared = usage.consumer_declared_version().as_str();
            if !declared_versions.iter().any(|v| v == declared) {
                declared_versions.push(declared.to_string());
            }
        }

        let own_major = package.version().leading_segment();
        let version_mismatch = package
            .used_by()
            .iter()
            .any(|u| u.consumer_declared_version().leading_segment() != own_major);

        VersionDivergence {
            name: package.name().to_string(),
            version: package.version().to_string(),
            usage_count: package.usage_count(),
            declared_versions,
            version_mismatch,
        }
    }

    fn mean(&self, operation: &'static str, value: fn(&Package) -> usize) -> Result<f64, GraphError> {
        self.ensure_not_empty(operation)?;
        let total: usize = self.graph.packages().map(value).sum();
        Ok(total as f64 / self.graph.len() as f64)
    }

    fn ensure_not_empty(&self, operation: &'static str) -> Result<(), GraphError> {
        if self.graph.is_empty() {
            return Err(GraphError::EmptyGraph { operation });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_analysis::domain::PackageRecord;
    use crate::graph_analysis::services::{EdgeReducer, GraphBuilder, UsageIndexer};

    fn indexed(records: &[PackageRecord]) -> DependencyGraph {
        let mut graph = GraphBuilder::default().build(records).unwrap();
        UsageIndexer::index(&mut graph);
        graph
    }

    /// X and Z are used three times, Y once; X is inserted before Z.
    fn usage_fixture() -> DependencyGraph {
        indexed(&[
            PackageRecord::new("X", "1.0.0"),
            PackageRecord::new("Y", "1.0.0"),
            PackageRecord::new("Z", "1.0.0"),
            PackageRecord::new("P1", "1.0.0")
                .with_dependency("X", "1.0.0")
                .with_dependency("Z", "1.0.0")
                .with_dependency("Y", "1.0.0"),
            PackageRecord::new("P2", "1.0.0")
                .with_dependency("X", "1.0.0")
                .with_dependency("Z", "1.0.0"),
            PackageRecord::new("P3", "1.0.0")
                .with_dependency("Z", "1.0.0")
                .with_dependency("X", "1.0.0"),
        ])
    }

    #[test]
    fn test_counts() {
        let graph = usage_fixture();
        let stats = GraphStatistics::new(&graph);

        assert_eq!(stats.count(), 6);
        assert_eq!(stats.distinct_name_count(), 6);
        assert_eq!(stats.edge_count(), 7);
    }

    #[test]
    fn test_top_n_by_usage_breaks_ties_by_insertion_order() {
        let graph = usage_fixture();
        let stats = GraphStatistics::new(&graph);

        let top = stats.top_n_by_usage(1).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name().as_str(), "X");

        let names: Vec<&str> = stats
            .top_n_by_usage(3)
            .unwrap()
            .iter()
            .map(|p| p.name().as_str())
            .collect();
        assert_eq!(names, vec!["X", "Z", "Y"]);
    }

    #[test]
    fn test_top_n_larger_than_graph() {
        let graph = usage_fixture();
        let stats = GraphStatistics::new(&graph);
        assert_eq!(stats.top_n_by_usage(100).unwrap().len(), 6);
    }

    #[test]
    fn test_averages() {
        let graph = indexed(&[
            PackageRecord::new("A", "1.0.0")
                .with_dependency("B", "1.0.0")
                .with_dependency("C", "1.0.0"),
            PackageRecord::new("B", "1.0.0").with_dependency("C", "1.0.0"),
            PackageRecord::new("C", "1.0.0"),
            PackageRecord::new("D", "1.0.0"),
        ]);
        let stats = GraphStatistics::new(&graph);

        assert!((stats.average_dependency_count().unwrap() - 0.75).abs() < f64::EPSILON);
        assert!((stats.average_usage_count().unwrap() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_graph_errors() {
        let graph = DependencyGraph::new();
        let stats = GraphStatistics::new(&graph);

        assert!(matches!(
            stats.average_dependency_count(),
            Err(GraphError::EmptyGraph { .. })
        ));
        assert!(matches!(
            stats.average_usage_count(),
            Err(GraphError::EmptyGraph { .. })
        ));
        assert!(matches!(
            stats.top_n_by_usage(10),
            Err(GraphError::EmptyGraph { .. })
        ));
        assert!(matches!(
            stats.top_n_by_version_divergence(10),
            Err(GraphError::EmptyGraph { .. })
        ));
        assert!(stats.usage_histogram().is_empty());
        assert_eq!(stats.count(), 0);
    }

    #[test]
    fn test_usage_histogram() {
        let graph = usage_fixture();
        let stats = GraphStatistics::new(&graph);

        // P1..P3 unused, Y used once, X and Z used three times
        assert_eq!(stats.usage_histogram(), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_version_divergence() {
        let graph = indexed(&[
            PackageRecord::new("Contoso.Core", "2.1.0"),
            PackageRecord::new("Contoso.Util", "1.0.0"),
            PackageRecord::new("A", "1.0.0")
                .with_dependency("Contoso.Core", "2.0.0")
                .with_dependency("Contoso.Util", "1.0.0"),
            PackageRecord::new("B", "1.0.0").with_dependency("Contoso.Core", "1.9.0"),
            PackageRecord::new("C", "1.0.0").with_dependency("Contoso.Core", "2.0.0"),
        ]);
        let stats = GraphStatistics::new(&graph);

        let top = stats.top_n_by_version_divergence(2).unwrap();

        assert_eq!(top[0].name, "Contoso.Core");
        assert_eq!(top[0].usage_count, 3);
        assert_eq!(top[0].declared_versions, vec!["2.0.0", "1.9.0"]);
        assert!(top[0].version_mismatch);
        assert_eq!(top[1].name, "Contoso.Util");
        assert!(!top[1].version_mismatch);
    }

    #[test]
    fn test_version_mismatch_ignores_range_brackets() {
        let graph = indexed(&[
            PackageRecord::new("Contoso.Core", "6.0.4"),
            PackageRecord::new("A", "1.0.0").with_dependency("Contoso.Core", "[6.0.0, )"),
        ]);
        let stats = GraphStatistics::new(&graph);

        let top = stats.top_n_by_version_divergence(1).unwrap();
        assert!(!top[0].version_mismatch);
    }

    #[test]
    fn test_node_degrees_follow_current_edges() {
        let mut graph = indexed(&[
            PackageRecord::new("A", "1.0.0")
                .with_dependency("B", "1.0.0")
                .with_dependency("C", "1.0.0")
                .with_dependency("External", "1.0.0"),
            PackageRecord::new("B", "1.0.0").with_dependency("C", "1.0.0"),
            PackageRecord::new("C", "1.0.0"),
        ]);

        let before = GraphStatistics::new(&graph).node_degrees();
        assert_eq!(
            before[2],
            PackageDegree {
                name: "C".to_string(),
                inbound: 2,
                outbound: 0
            }
        );
        assert_eq!(before[0].outbound, 3);

        EdgeReducer::reduce(&mut graph);

        let after = GraphStatistics::new(&graph).node_degrees();
        assert_eq!(after[2].inbound, 1);
        assert_eq!(after[0].outbound, 2);
    }

    #[test]
    fn test_unresolved_references() {
        let graph = indexed(&[
            PackageRecord::new("A", "1.0.0")
                .with_dependency("B", "1.0.0")
                .with_dependency("System.Memory", "4.5.5"),
            PackageRecord::new("B", "1.0.0"),
        ]);
        let stats = GraphStatistics::new(&graph);

        let unresolved = stats.unresolved_references();
        assert_eq!(
            unresolved,
            vec![UnresolvedReference {
                consumer: "A".to_string(),
                dependency: "System.Memory".to_string(),
                declared_version: "4.5.5".to_string(),
            }]
        );
    }

    #[test]
    fn test_main_package_count() {
        let graph = indexed(&[
            PackageRecord::new("Contoso.Data.Sql", "1.0.0"),
            PackageRecord::new("Contoso.Data.Sql.Abstractions", "1.0.0"),
            PackageRecord::new("Contoso.Web.Api", "1.0.0"),
            PackageRecord::new("Contoso", "1.0.0"),
        ]);
        assert_eq!(GraphStatistics::new(&graph).main_package_count(), 2);
    }
}
