use chrono::Utc;
use uuid::Uuid;

/// Run-level metadata shared by every snapshot of one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    run_id: String,
}

impl AnalysisMetadata {
    pub fn new(timestamp: String, tool_name: String, tool_version: String, run_id: String) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            run_id,
        }
    }

    /// Generates metadata with the current timestamp and a fresh run id
    pub fn generate(tool_name: &str, tool_version: &str) -> Self {
        Self::new(
            Utc::now().to_rfc3339(),
            tool_name.to_string(),
            tool_version.to_string(),
            Uuid::new_v4().to_string(),
        )
    }

    /// Metadata for this binary, using the compile-time crate version
    pub fn generate_default() -> Self {
        Self::generate(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}
