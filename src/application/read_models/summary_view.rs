//! Statistics view structs for the read model

/// Aggregated statistics of one graph snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub package_count: usize,
    pub distinct_name_count: usize,
    pub main_package_count: usize,
    pub edge_count: usize,
    /// `None` for an empty graph
    pub average_dependency_count: Option<f64>,
    /// `None` for an empty graph
    pub average_usage_count: Option<f64>,
    pub usage_histogram: Vec<usize>,
    /// Requested length of the top-N listings
    pub top: usize,
    /// Every package, most used first
    pub by_usage: Vec<UsageView>,
    pub top_by_usage: Vec<UsageView>,
    pub top_by_divergence: Vec<DivergenceView>,
    pub unresolved: Vec<UnresolvedView>,
}

/// One package's usage figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageView {
    pub name: String,
    pub version: String,
    pub dependency_count: usize,
    pub usage_count: usize,
    pub distinct_declared_versions: usize,
}

/// One package's spread of declared versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivergenceView {
    pub name: String,
    pub version: String,
    pub usage_count: usize,
    pub declared_versions: Vec<String>,
    pub version_mismatch: bool,
}

/// A dependency entry pointing outside the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedView {
    pub consumer: String,
    pub dependency: String,
    pub declared_version: String,
}
