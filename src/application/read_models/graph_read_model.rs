//! Graph read model for query operations
//!
//! One `GraphReadModel` describes one snapshot of the dependency graph
//! (before or after reduction) in the shape renderers need.

use super::summary_view::SummaryView;
use std::fmt;

/// Which snapshot of the graph a read model describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    /// The graph as built from the lock file
    Original,
    /// The graph after redundant direct edges were removed
    Reduced,
}

impl Snapshot {
    /// Suffix used in artifact file names
    pub fn slug(&self) -> &'static str {
        match self {
            Snapshot::Original => "original",
            Snapshot::Reduced => "reduced",
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Original => write!(f, "original graph"),
            Snapshot::Reduced => write!(f, "reduced graph"),
        }
    }
}

/// Main read model for one graph snapshot
#[derive(Debug, Clone)]
pub struct GraphReadModel {
    pub metadata: GraphMetadataView,
    /// Packages in insertion order
    pub nodes: Vec<NodeView>,
    /// Dependency entries that resolve to a node, in declaration order
    pub edges: Vec<EdgeView>,
    pub summary: SummaryView,
    /// Edges removed to obtain this snapshot; empty for the original graph
    pub removed_edges: Vec<RemovedEdgeView>,
}

impl GraphReadModel {
    /// Returns true if the package at `row` depends on the package at `column`
    pub fn has_edge(&self, row: usize, column: usize) -> bool {
        self.edges.iter().any(|e| e.from == row && e.to == column)
    }
}

/// View representation of the analysis metadata
#[derive(Debug, Clone)]
pub struct GraphMetadataView {
    pub snapshot: Snapshot,
    /// Name prefix the packages were filtered by; empty if unfiltered
    pub prefix: String,
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub run_id: String,
}

/// View representation of one package
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub name: String,
    pub version: String,
    /// First three dotted name segments, lowercased
    pub root: String,
    pub inbound: usize,
    pub outbound: usize,
    pub usage_count: usize,
}

/// View representation of one resolvable dependency entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeView {
    /// Index of the consumer in `nodes`
    pub from: usize,
    /// Index of the dependency in `nodes`
    pub to: usize,
    pub declared_version: String,
    /// True if both ends share the same root family
    pub same_root: bool,
}

/// View representation of one removed dependency entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEdgeView {
    pub consumer: String,
    pub dependency: String,
    pub declared_version: String,
    /// Surviving dependency through which the removed one stays reachable
    pub provider: String,
}
