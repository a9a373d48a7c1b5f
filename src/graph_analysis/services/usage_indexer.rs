use crate::graph_analysis::domain::{DependencyGraph, UsedBy};
use log::debug;

/// UsageIndexer service populating the reverse "used by" edges
///
/// Must run against the original graph, before any reduction: the usage
/// history reflects what each consumer declared, not what survives reduction.
pub struct UsageIndexer;

impl UsageIndexer {
    /// Appends one `UsedBy` record to the target of every resolvable edge
    ///
    /// Packages and their dependencies are visited in insertion order, so the
    /// resulting lists are reproducible. Dependencies naming a package outside
    /// the graph are skipped. The index is append-only: calling this twice
    /// without [`UsageIndexer::clear`] duplicates every entry.
    ///
    /// # Returns
    /// The number of inverse edges appended
    pub fn index(graph: &mut DependencyGraph) -> usize {
        let mut pending: Vec<(usize, UsedBy)> = Vec::new();
        let mut unresolved = 0usize;

        for consumer in graph.packages() {
            for dependency in consumer.dependencies() {
                match graph.resolve_indexed(dependency) {
                    Some((producer_index, producer)) => {
                        pending.push((
                            producer_index,
                            UsedBy::new(
                                consumer.name().clone(),
                                dependency.version().clone(),
                                producer.version().clone(),
                            ),
                        ));
                    }
                    None => unresolved += 1,
                }
            }
        }

        let appended = pending.len();
        for (producer_index, usage) in pending {
            if let Some(producer) = graph.get_index_mut(producer_index) {
                producer.record_usage(usage);
            }
        }

        debug!(
            "Indexed {} usage(s); {} dependency reference(s) point outside the graph",
            appended, unresolved
        );
        appended
    }

    /// Empties every usage list so the graph can be indexed again
    pub fn clear(graph: &mut DependencyGraph) {
        for package in graph.packages_mut().values_mut() {
            package.clear_usages();
        }
    }
}
