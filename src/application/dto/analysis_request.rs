use crate::graph_analysis::services::DuplicatePolicy;
use std::path::PathBuf;

/// Default length of the top-N listings in the report
pub const DEFAULT_TOP: usize = 10;

/// AnalysisRequest - Internal request DTO for the analysis use case
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Path to the `project.assets.json` file
    pub lockfile_path: PathBuf,
    /// Case-insensitive package name prefix; empty keeps every package
    pub prefix: String,
    /// Restrict parsing to one target framework; `None` reads all of them
    pub target_framework: Option<String>,
    pub duplicate_policy: DuplicatePolicy,
    /// Length of the top-N listings
    pub top: usize,
}

impl AnalysisRequest {
    pub fn new(lockfile_path: PathBuf, prefix: impl Into<String>) -> Self {
        Self {
            lockfile_path,
            prefix: prefix.into(),
            target_framework: None,
            duplicate_policy: DuplicatePolicy::default(),
            top: DEFAULT_TOP,
        }
    }

    pub fn with_target_framework(mut self, target_framework: Option<String>) -> Self {
        self.target_framework = target_framework;
        self
    }

    pub fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }
}
