use crate::application::read_models::GraphReadModel;
use crate::graph_analysis::domain::DependencyGraph;
use crate::graph_analysis::services::ReductionReport;

/// AnalysisResponse - Result of the analysis use case
///
/// Holds both graph snapshots and their read models so callers can compare
/// the graph before and after reduction.
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    /// Indexed graph as built from the lock file
    pub original_graph: DependencyGraph,
    /// The same graph after redundant direct edges were removed
    pub reduced_graph: DependencyGraph,
    pub reduction: ReductionReport,
    pub original: GraphReadModel,
    pub reduced: GraphReadModel,
}
