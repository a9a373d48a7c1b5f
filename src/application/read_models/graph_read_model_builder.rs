//! Builder for constructing GraphReadModel from domain objects
//!
//! This module provides the builder that transforms one graph snapshot into
//! the query-optimized read model consumed by the formatters.

use super::analysis_metadata::AnalysisMetadata;
use super::graph_read_model::{
    EdgeView, GraphMetadataView, GraphReadModel, NodeView, RemovedEdgeView, Snapshot,
};
use super::summary_view::{DivergenceView, SummaryView, UnresolvedView, UsageView};
use crate::graph_analysis::domain::{DependencyGraph, Package};
use crate::graph_analysis::services::{GraphStatistics, ReductionReport};
use std::collections::HashSet;

/// Number of dotted name segments that make up a root family
const ROOT_SEGMENTS: usize = 3;

/// Builder for constructing GraphReadModel from a graph snapshot
pub struct GraphReadModelBuilder;

impl GraphReadModelBuilder {
    /// Builds a read model of `graph`
    ///
    /// # Arguments
    /// * `graph` - The snapshot to describe; must already be indexed
    /// * `snapshot` - Whether this is the original or the reduced graph
    /// * `prefix` - Scope prefix the records were filtered by
    /// * `top` - Length of the top-N listings
    /// * `metadata` - Run-level metadata
    /// * `reduction` - Removed edges, for the reduced snapshot
    pub fn build(
        graph: &DependencyGraph,
        snapshot: Snapshot,
        prefix: &str,
        top: usize,
        metadata: &AnalysisMetadata,
        reduction: Option<&ReductionReport>,
    ) -> GraphReadModel {
        let statistics = GraphStatistics::new(graph);

        GraphReadModel {
            metadata: Self::build_metadata(snapshot, prefix, metadata),
            nodes: Self::build_nodes(graph, &statistics),
            edges: Self::build_edges(graph),
            summary: Self::build_summary(graph, &statistics, top),
            removed_edges: reduction.map(Self::build_removed).unwrap_or_default(),
        }
    }

    fn build_metadata(snapshot: Snapshot, prefix: &str, metadata: &AnalysisMetadata) -> GraphMetadataView {
        GraphMetadataView {
            snapshot,
            prefix: prefix.to_string(),
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            run_id: metadata.run_id().to_string(),
        }
    }

    fn build_nodes(graph: &DependencyGraph, statistics: &GraphStatistics<'_>) -> Vec<NodeView> {
        graph
            .packages()
            .zip(statistics.node_degrees())
            .map(|(package, degree)| NodeView {
                name: package.name().to_string(),
                version: package.version().to_string(),
                root: package.name().root(ROOT_SEGMENTS).to_lowercase(),
                inbound: degree.inbound,
                outbound: degree.outbound,
                usage_count: package.usage_count(),
            })
            .collect()
    }

    /// Only entries that resolve to a node become edges
    fn build_edges(graph: &DependencyGraph) -> Vec<EdgeView> {
        let mut edges = Vec::new();
        for (from, package) in graph.packages().enumerate() {
            let root = package.name().root(ROOT_SEGMENTS).to_lowercase();
            for dependency in package.dependencies() {
                let Some(to) = graph.index_of(dependency.name().key()) else {
                    continue;
                };
                edges.push(EdgeView {
                    from,
                    to,
                    declared_version: dependency.version().to_string(),
                    same_root: dependency.name().root(ROOT_SEGMENTS).to_lowercase() == root,
                });
            }
        }
        edges
    }

    fn build_summary(graph: &DependencyGraph, statistics: &GraphStatistics<'_>, top: usize) -> SummaryView {
        let by_usage: Vec<UsageView> = statistics
            .top_n_by_usage(graph.len())
            .unwrap_or_default()
            .into_iter()
            .map(Self::usage_view)
            .collect();

        let top_by_divergence = statistics
            .top_n_by_version_divergence(top)
            .unwrap_or_default()
            .into_iter()
            .map(|d| DivergenceView {
                name: d.name,
                version: d.version,
                usage_count: d.usage_count,
                declared_versions: d.declared_versions,
                version_mismatch: d.version_mismatch,
            })
            .collect();

        let unresolved = statistics
            .unresolved_references()
            .into_iter()
            .map(|u| UnresolvedView {
                consumer: u.consumer,
                dependency: u.dependency,
                declared_version: u.declared_version,
            })
            .collect();

        SummaryView {
            package_count: statistics.count(),
            distinct_name_count: statistics.distinct_name_count(),
            main_package_count: statistics.main_package_count(),
            edge_count: statistics.edge_count(),
            average_dependency_count: statistics.average_dependency_count().ok(),
            average_usage_count: statistics.average_usage_count().ok(),
            usage_histogram: statistics.usage_histogram(),
            top,
            top_by_usage: by_usage.iter().take(top).cloned().collect(),
            by_usage,
            top_by_divergence,
            unresolved,
        }
    }

    fn usage_view(package: &Package) -> UsageView {
        let distinct_declared_versions = package
            .used_by()
            .iter()
            .map(|u| u.consumer_declared_version().as_str())
            .collect::<HashSet<_>>()
            .len();

        UsageView {
            name: package.name().to_string(),
            version: package.version().to_string(),
            dependency_count: package.dependency_count(),
            usage_count: package.usage_count(),
            distinct_declared_versions,
        }
    }

    fn build_removed(report: &ReductionReport) -> Vec<RemovedEdgeView> {
        report
            .removed()
            .iter()
            .map(|r| RemovedEdgeView {
                consumer: r.consumer.to_string(),
                dependency: r.dependency.name().to_string(),
                declared_version: r.dependency.version().to_string(),
                provider: r.provider.to_string(),
            })
            .collect()
    }
}
