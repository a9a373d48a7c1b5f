use crate::graph_analysis::domain::{Dependency, DependencyGraph, Package, PackageName};
use log::{debug, trace};
use std::collections::{BTreeSet, HashMap, HashSet};

/// A direct dependency entry dropped by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEdge {
    /// Package whose dependency list lost the entry
    pub consumer: PackageName,
    /// The removed entry, with the version the consumer declared
    pub dependency: Dependency,
    /// The remaining direct dependency through which the target is still reached
    pub provider: PackageName,
}

/// Outcome of a reduction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReductionReport {
    removed: Vec<RemovedEdge>,
}

impl ReductionReport {
    pub fn removed(&self) -> &[RemovedEdge] {
        &self.removed
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    /// Removed entries for one consumer, in original declaration order
    pub fn removed_for(&self, consumer: &str) -> Vec<&RemovedEdge> {
        self.removed
            .iter()
            .filter(|edge| edge.consumer.matches(consumer))
            .collect()
    }
}

/// EdgeReducer service removing direct dependencies already implied by a longer path
///
/// This is a one-pass heuristic, not a minimum-edge transitive reduction.
/// All traversals keep a visited set, so cyclic inputs terminate.
pub struct EdgeReducer;

impl EdgeReducer {
    /// Names reachable two or more hops away from `name`
    ///
    /// Starts from each direct dependency of the package and follows that
    /// dependency's own dependencies transitively, unioning the results.
    /// Dangling names are included but not expanded. Returns case-folded names.
    pub fn reachable_via_dependencies(graph: &DependencyGraph, name: &str) -> BTreeSet<String> {
        let mut reachable = BTreeSet::new();
        let Some(package) = graph.get(name) else {
            return reachable;
        };

        let mut stack: Vec<&Package> = package
            .dependencies()
            .iter()
            .filter_map(|d| graph.resolve(d))
            .collect();
        let mut expanded: HashSet<&str> = HashSet::new();

        while let Some(current) = stack.pop() {
            if !expanded.insert(current.name().key()) {
                continue;
            }
            for dependency in current.dependencies() {
                reachable.insert(dependency.name().key().to_string());
                if let Some(next) = graph.resolve(dependency) {
                    stack.push(next);
                }
            }
        }

        reachable
    }

    /// Removes redundant direct dependencies in one left-to-right pass
    ///
    /// A direct entry `P -> D` is removed when `D` is reachable from another
    /// direct dependency of `P` that is still kept, along a path that does not
    /// go back through `P`. On acyclic graphs this removes exactly the entries
    /// named in [`EdgeReducer::reachable_via_dependencies`]; on cyclic graphs
    /// it never changes what each package can reach.
    ///
    /// Only dependency lists shrink. Usage lists are left untouched and later
    /// packages are not re-evaluated after an earlier removal.
    pub fn reduce(graph: &mut DependencyGraph) -> ReductionReport {
        let mut report = ReductionReport::default();

        for index in 0..graph.len() {
            let Some(package) = graph.get_index(index) else {
                continue;
            };
            let redundant = Self::redundant_dependencies(graph, package);
            if redundant.is_empty() {
                continue;
            }

            let consumer = package.name().clone();
            let Some(package) = graph.get_index_mut(index) else {
                continue;
            };
            let removed = package.retain_dependencies(|d| !redundant.contains_key(d.name().key()));

            for dependency in removed {
                let provider = redundant
                    .get(dependency.name().key())
                    .cloned()
                    .unwrap_or_else(|| dependency.name().clone());
                trace!(
                    "Removing {} -> {} (reachable via {})",
                    consumer,
                    dependency.name(),
                    provider
                );
                report.removed.push(RemovedEdge {
                    consumer: consumer.clone(),
                    dependency,
                    provider,
                });
            }
        }

        debug!(
            "Reduction removed {} redundant edge(s); {} edge(s) remain",
            report.removed_count(),
            graph.edge_count()
        );
        report
    }

    /// Maps each redundant dependency key of `package` to the direct
    /// dependency that still reaches it
    fn redundant_dependencies(
        graph: &DependencyGraph,
        package: &Package,
    ) -> HashMap<String, PackageName> {
        let consumer_key = package.name().key();

        let mut providers: Vec<(&PackageName, HashSet<String>)> = Vec::new();
        for dependency in package.dependencies() {
            if providers.iter().any(|(name, _)| *name == dependency.name()) {
                continue;
            }
            let reach = Self::descendants_avoiding(graph, dependency, consumer_key);
            providers.push((dependency.name(), reach));
        }

        let mut surviving: Vec<&PackageName> = providers.iter().map(|(name, _)| *name).collect();
        let mut redundant = HashMap::new();

        for (candidate, _) in &providers {
            let provider = providers.iter().find(|(other, reach)| {
                other != candidate && surviving.contains(other) && reach.contains(candidate.key())
            });
            if let Some((provider, _)) = provider {
                redundant.insert(candidate.key().to_string(), (*provider).clone());
                surviving.retain(|name| name != candidate);
            }
        }

        redundant
    }

    /// Names reachable from the package `dependency` points at, one or more
    /// hops away, without expanding the package keyed `avoid`
    fn descendants_avoiding(
        graph: &DependencyGraph,
        dependency: &Dependency,
        avoid: &str,
    ) -> HashSet<String> {
        let mut reachable = HashSet::new();
        let Some(start) = graph.resolve(dependency) else {
            return reachable;
        };

        let mut stack: Vec<&Package> = vec![start];
        let mut expanded: HashSet<&str> = HashSet::new();

        while let Some(current) = stack.pop() {
            let key = current.name().key();
            if key == avoid || !expanded.insert(key) {
                continue;
            }
            for next in current.dependencies() {
                reachable.insert(next.name().key().to_string());
                if let Some(package) = graph.resolve(next) {
                    stack.push(package);
                }
            }
        }

        reachable
    }
}
