use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::shared::Result;

/// GraphAnalysisPort - Inbound port for the dependency analysis use case
///
/// This port defines the interface that external adapters (CLI, tests)
/// use to trigger an analysis. It represents the application's public API.
pub trait GraphAnalysisPort {
    /// Reads, builds, indexes and reduces the dependency graph of one lock file
    ///
    /// # Returns
    /// Snapshots of the graph before and after reduction
    ///
    /// # Errors
    /// Returns an error if:
    /// - The lock file cannot be read or parsed
    /// - The requested target framework is not present
    /// - The records are malformed or violate the duplicate policy
    fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}
