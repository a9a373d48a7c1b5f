use crate::graph_analysis::domain::{
    Dependency, DependencyGraph, Package, PackageName, PackageRecord, Version,
};
use crate::shared::error::GraphError;
use log::{debug, trace};

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// What the builder does when two records carry the same package name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later record replaces the earlier one, keeping the earlier position
    #[default]
    LastWins,
    /// The later record is ignored
    FirstWins,
    /// Building fails with `GraphError::DuplicatePackage`
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "last-wins" | "last" => Ok(DuplicatePolicy::LastWins),
            "first-wins" | "first" => Ok(DuplicatePolicy::FirstWins),
            "reject" => Ok(DuplicatePolicy::Reject),
            _ => Err(format!(
                "Invalid duplicate policy: {}. Please specify 'last-wins', 'first-wins' or 'reject'",
                s
            )),
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::LastWins => write!(f, "last-wins"),
            DuplicatePolicy::FirstWins => write!(f, "first-wins"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// GraphBuilder service turning flat package records into a [`DependencyGraph`]
///
/// The builder is scope-agnostic: records are expected to be filtered by the
/// caller. Dependency names without a matching record are kept as dangling
/// entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    policy: DuplicatePolicy,
}

impl GraphBuilder {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Builds the graph, preserving record order and declaration order
    ///
    /// # Errors
    /// - `MalformedRecord` if a record's name or version is empty, the name is
    ///   too long, or one of its dependency names is empty
    /// - `DuplicatePackage` for a repeated name under [`DuplicatePolicy::Reject`]
    pub fn build(&self, records: &[PackageRecord]) -> Result<DependencyGraph, GraphError> {
        let mut graph = DependencyGraph::new();

        for (index, record) in records.iter().enumerate() {
            let package = Self::package_from_record(index, record)?;
            let key = DependencyGraph::entry_key(&package);
            let packages = graph.packages_mut();

            match (packages.get_mut(&key), self.policy) {
                (None, _) => {
                    packages.insert(key, package);
                }
                (Some(existing), DuplicatePolicy::LastWins) => {
                    trace!(
                        "Replacing {} {} with {} (last wins)",
                        existing.name(),
                        existing.version(),
                        package.version()
                    );
                    *existing = package;
                }
                (Some(existing), DuplicatePolicy::FirstWins) => {
                    trace!(
                        "Ignoring {} {}, keeping {} (first wins)",
                        package.name(),
                        package.version(),
                        existing.version()
                    );
                }
                (Some(existing), DuplicatePolicy::Reject) => {
                    return Err(GraphError::DuplicatePackage {
                        name: record.name.clone(),
                        first_version: existing.version().to_string(),
                        second_version: record.version.clone(),
                    });
                }
            }
        }

        debug!(
            "Built graph with {} package(s) and {} edge(s) from {} record(s)",
            graph.len(),
            graph.edge_count(),
            records.len()
        );
        Ok(graph)
    }

    fn package_from_record(index: usize, record: &PackageRecord) -> Result<Package, GraphError> {
        let malformed = |reason: String| GraphError::MalformedRecord {
            index,
            name: record.name.clone(),
            reason,
        };

        if record.name.trim().is_empty() {
            return Err(malformed("package name is empty".to_string()));
        }
        if record.name.len() > MAX_PACKAGE_NAME_LENGTH {
            return Err(malformed(format!(
                "package name is too long ({} bytes, maximum {})",
                record.name.len(),
                MAX_PACKAGE_NAME_LENGTH
            )));
        }
        if record.version.trim().is_empty() {
            return Err(malformed("package version is empty".to_string()));
        }

        let mut dependencies = Vec::with_capacity(record.dependencies.len());
        for (position, dependency) in record.dependencies.iter().enumerate() {
            if dependency.name.trim().is_empty() {
                return Err(malformed(format!(
                    "dependency #{} has an empty name",
                    position
                )));
            }
            dependencies.push(Dependency::new(
                dependency.name.clone(),
                dependency.version.clone(),
            ));
        }

        Ok(Package::new(
            PackageName::new(record.name.clone()),
            Version::new(record.version.clone()),
            dependencies,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn records() -> Vec<PackageRecord> {
        vec![
            PackageRecord::new("A", "1.0.0")
                .with_dependency("B", "1.0.0")
                .with_dependency("C", "2.0.0"),
            PackageRecord::new("B", "1.0.0").with_dependency("C", "2.0.0"),
            PackageRecord::new("C", "2.1.0"),
        ]
    }

    #[test]
    fn test_build_preserves_order() {
        let graph = GraphBuilder::default().build(&records()).unwrap();

        assert_eq!(graph.package_names(), vec!["A", "B", "C"]);
        let a = graph.get("A").unwrap();
        let deps: Vec<&str> = a.dependencies().iter().map(|d| d.name().as_str()).collect();
        assert_eq!(deps, vec!["B", "C"]);
        assert_eq!(a.dependencies()[1].version().as_str(), "2.0.0");
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = GraphBuilder::default().build(&records()).unwrap();
        let second = GraphBuilder::default().build(&records()).unwrap();

        assert_eq!(first.package_names(), second.package_names());
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_does_not_index_usages() {
        let graph = GraphBuilder::default().build(&records()).unwrap();
        assert!(graph.packages().all(|p| p.usage_count() == 0));
    }

    #[test]
    fn test_build_accepts_dangling_dependencies() {
        let records = vec![PackageRecord::new("A", "1.0.0").with_dependency("System.Memory", "4.5.5")];
        let graph = GraphBuilder::default().build(&records).unwrap();

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("A").unwrap().dependency_count(), 1);
    }

    #[test]
    fn test_build_empty_input() {
        let graph = GraphBuilder::default().build(&[]).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let records = vec![PackageRecord::new("A", "1.0.0"), PackageRecord::new("", "1.0.0")];
        let err = GraphBuilder::default().build(&records).unwrap_err();
        assert!(matches!(err, GraphError::MalformedRecord { index: 1, .. }));
    }

    #[test]
    fn test_build_rejects_empty_version() {
        let records = vec![PackageRecord::new("A", "  ")];
        let err = GraphBuilder::default().build(&records).unwrap_err();
        match err {
            GraphError::MalformedRecord { index, name, reason } => {
                assert_eq!(index, 0);
                assert_eq!(name, "A");
                assert!(reason.contains("version"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_empty_dependency_name() {
        let records = vec![PackageRecord::new("A", "1.0.0").with_dependency("", "1.0.0")];
        let err = GraphBuilder::default().build(&records).unwrap_err();
        assert!(matches!(err, GraphError::MalformedRecord { .. }));
    }

    #[test]
    fn test_build_rejects_overlong_name() {
        let records = vec![PackageRecord::new("a".repeat(256), "1.0.0")];
        let err = GraphBuilder::default().build(&records).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_duplicate_last_wins_keeps_first_position() {
        let records = vec![
            PackageRecord::new("A", "1.0.0"),
            PackageRecord::new("B", "1.0.0"),
            PackageRecord::new("a", "2.0.0").with_dependency("B", "1.0.0"),
        ];
        let graph = GraphBuilder::new(DuplicatePolicy::LastWins)
            .build(&records)
            .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.index_of("A"), Some(0));
        let a = graph.get("A").unwrap();
        assert_eq!(a.version().as_str(), "2.0.0");
        assert_eq!(a.dependency_count(), 1);
    }

    #[test]
    fn test_duplicate_first_wins() {
        let records = vec![PackageRecord::new("A", "1.0.0"), PackageRecord::new("A", "2.0.0")];
        let graph = GraphBuilder::new(DuplicatePolicy::FirstWins)
            .build(&records)
            .unwrap();

        assert_eq!(graph.get("A").unwrap().version().as_str(), "1.0.0");
    }

    #[test]
    fn test_duplicate_reject() {
        let records = vec![PackageRecord::new("A", "1.0.0"), PackageRecord::new("A", "2.0.0")];
        let err = GraphBuilder::new(DuplicatePolicy::Reject)
            .build(&records)
            .unwrap_err();

        assert_eq!(
            err,
            GraphError::DuplicatePackage {
                name: "A".to_string(),
                first_version: "1.0.0".to_string(),
                second_version: "2.0.0".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_policy_from_str() {
        assert_eq!(DuplicatePolicy::from_str("last-wins").unwrap(), DuplicatePolicy::LastWins);
        assert_eq!(DuplicatePolicy::from_str("FIRST_WINS").unwrap(), DuplicatePolicy::FirstWins);
        assert_eq!(DuplicatePolicy::from_str("reject").unwrap(), DuplicatePolicy::Reject);
        assert!(DuplicatePolicy::from_str("newest").is_err());
    }

    #[test]
    fn test_duplicate_policy_display_round_trips() {
        for policy in [
            DuplicatePolicy::LastWins,
            DuplicatePolicy::FirstWins,
            DuplicatePolicy::Reject,
        ] {
            assert_eq!(DuplicatePolicy::from_str(&policy.to_string()).unwrap(), policy);
        }
    }
}
