mod edge_reducer;
mod graph_builder;
mod graph_statistics;
mod scope_filter;
mod usage_indexer;

pub use edge_reducer::{EdgeReducer, ReductionReport, RemovedEdge};
pub use graph_builder::{DuplicatePolicy, GraphBuilder};
pub use graph_statistics::{
    GraphStatistics, PackageDegree, UnresolvedReference, VersionDivergence,
};
pub use scope_filter::ScopeFilter;
pub use usage_indexer::UsageIndexer;
