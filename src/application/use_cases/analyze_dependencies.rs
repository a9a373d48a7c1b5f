use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::application::read_models::{AnalysisMetadata, GraphReadModelBuilder, Snapshot};
use crate::graph_analysis::domain::PackageRecord;
use crate::graph_analysis::services::{EdgeReducer, GraphBuilder, ScopeFilter, UsageIndexer};
use crate::ports::inbound::GraphAnalysisPort;
use crate::ports::outbound::{LockfileReader, ProgressReporter};
use crate::shared::Result;
use log::debug;

/// AnalyzeDependenciesUseCase - reads a lock file and derives both graph snapshots
///
/// Pipeline: read → parse → scope filter → build → index → snapshot →
/// reduce → snapshot. Usage is indexed once, on the original edges, so the
/// reduced snapshot still reports who originally depended on whom.
///
/// # Type Parameters
/// * `LR` - LockfileReader implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeDependenciesUseCase<LR, PR> {
    lockfile_reader: LR,
    progress_reporter: PR,
}

impl<LR, PR> AnalyzeDependenciesUseCase<LR, PR>
where
    LR: LockfileReader,
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeDependenciesUseCase with injected dependencies
    pub fn new(lockfile_reader: LR, progress_reporter: PR) -> Self {
        Self {
            lockfile_reader,
            progress_reporter,
        }
    }

    /// Executes the analysis
    ///
    /// # Errors
    /// Returns an error if the lock file cannot be read or parsed, the
    /// prefix is invalid, or the records violate the duplicate policy
    pub fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let records = self.read_records(&request)?;
        let records = self.apply_scope_filter(records, &request.prefix)?;

        let mut graph = GraphBuilder::new(request.duplicate_policy).build(&records)?;
        let indexed = UsageIndexer::index(&mut graph);
        debug!(
            "Built graph with {} packages and {} edges ({} usages indexed)",
            graph.len(),
            graph.edge_count(),
            indexed
        );
        self.progress_reporter.report(&format!(
            "🔗 Built dependency graph: {} package(s), {} dependency edge(s)",
            graph.len(),
            graph.edge_count()
        ));

        let metadata = AnalysisMetadata::generate_default();
        let original_graph = graph.clone();
        let original = GraphReadModelBuilder::build(
            &original_graph,
            Snapshot::Original,
            &request.prefix,
            request.top,
            &metadata,
            None,
        );

        let reduction = EdgeReducer::reduce(&mut graph);
        self.progress_reporter.report(&format!(
            "✂️  Removed {} redundant direct dependenc{}",
            reduction.removed_count(),
            if reduction.removed_count() == 1 { "y" } else { "ies" }
        ));

        let reduced = GraphReadModelBuilder::build(
            &graph,
            Snapshot::Reduced,
            &request.prefix,
            request.top,
            &metadata,
            Some(&reduction),
        );

        Ok(AnalysisResponse {
            original_graph,
            reduced_graph: graph,
            reduction,
            original,
            reduced,
        })
    }

    fn read_records(&self, request: &AnalysisRequest) -> Result<Vec<PackageRecord>> {
        self.progress_reporter.report(&format!(
            "📖 Loading lock file from: {}",
            request.lockfile_path.display()
        ));

        let parsed = self
            .lockfile_reader
            .read_and_parse_lockfile(&request.lockfile_path, request.target_framework.as_deref())?;

        let frameworks = match &request.target_framework {
            Some(target) => target.clone(),
            None => parsed.target_frameworks.join(", "),
        };
        self.progress_reporter.report(&format!(
            "✅ Detected {} package record(s) for target(s): {}",
            parsed.records.len(),
            if frameworks.is_empty() { "(none)" } else { frameworks.as_str() }
        ));

        Ok(parsed.records)
    }

    fn apply_scope_filter(
        &self,
        records: Vec<PackageRecord>,
        prefix: &str,
    ) -> Result<Vec<PackageRecord>> {
        let filter = ScopeFilter::new(prefix)?;
        if filter.is_unrestricted() {
            return Ok(records);
        }

        let original_count = records.len();
        let filtered = filter.apply(records);
        self.progress_reporter.report(&format!(
            "🔎 Kept {} of {} record(s) matching '{}'",
            filtered.len(),
            original_count,
            prefix
        ));

        if filtered.is_empty() && original_count > 0 {
            self.progress_reporter.report_warning(&format!(
                "No package name starts with '{}'. The graph will be empty.",
                prefix
            ));
        }

        Ok(filtered)
    }
}

impl<LR, PR> GraphAnalysisPort for AnalyzeDependenciesUseCase<LR, PR>
where
    LR: LockfileReader,
    PR: ProgressReporter,
{
    fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        self.execute(request)
    }
}
