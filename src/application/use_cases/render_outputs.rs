use crate::application::dto::{AnalysisResponse, RenderRequest, RenderResponse};
use crate::application::factories::{FormatterFactory, FormatterType};
use crate::application::read_models::GraphReadModel;
use crate::ports::outbound::{ArtifactWriter, DiagramRasterizer, OutputPresenter, ProgressReporter};
use crate::shared::Result;
use futures::future::try_join_all;
use log::debug;
use std::path::PathBuf;

/// RenderOutputsUseCase - writes the matrix, both diagrams and the report
///
/// The matrix describes the original graph. One diagram is written per
/// snapshot; when Graphviz is available both are rasterized concurrently.
/// The report goes to the presenter last.
///
/// # Type Parameters
/// * `AW` - ArtifactWriter implementation
/// * `OP` - OutputPresenter implementation
/// * `PR` - ProgressReporter implementation
/// * `DR` - DiagramRasterizer implementation
pub struct RenderOutputsUseCase<AW, OP, PR, DR> {
    artifact_writer: AW,
    output_presenter: OP,
    progress_reporter: PR,
    rasterizer: DR,
}

impl<AW, OP, PR, DR> RenderOutputsUseCase<AW, OP, PR, DR>
where
    AW: ArtifactWriter,
    OP: OutputPresenter,
    PR: ProgressReporter,
    DR: DiagramRasterizer,
{
    /// Creates a new RenderOutputsUseCase with injected dependencies
    pub fn new(artifact_writer: AW, output_presenter: OP, progress_reporter: PR, rasterizer: DR) -> Self {
        Self {
            artifact_writer,
            output_presenter,
            progress_reporter,
            rasterizer,
        }
    }

    /// Executes the rendering
    ///
    /// # Errors
    /// Returns an error if an artifact cannot be written, Graphviz is
    /// installed but fails, or the report cannot be presented. A missing
    /// Graphviz installation only produces a warning.
    pub async fn execute(&self, analysis: &AnalysisResponse, request: &RenderRequest) -> Result<RenderResponse> {
        let diagram = FormatterType::Diagram {
            layout: request.layout.clone(),
        };
        let jobs: [(&GraphReadModel, FormatterType, String); 3] = [
            (
                &analysis.original,
                FormatterType::Matrix(request.matrix_format),
                format!("{}-matrix", request.file_stem),
            ),
            (
                &analysis.original,
                diagram.clone(),
                format!("{}-{}", request.file_stem, analysis.original.metadata.snapshot.slug()),
            ),
            (
                &analysis.reduced,
                diagram,
                format!("{}-{}", request.file_stem, analysis.reduced.metadata.snapshot.slug()),
            ),
        ];

        let total = jobs.len();
        let mut artifacts = Vec::with_capacity(total);
        for (step, (model, formatter_type, stem)) in jobs.into_iter().enumerate() {
            let message = FormatterFactory::progress_message(&formatter_type);
            self.progress_reporter.report_progress(step, total, Some(message));

            let formatter = FormatterFactory::create(formatter_type);
            let content = formatter.format(model)?;
            let file_name = format!("{}.{}", stem, formatter.file_extension());
            artifacts.push(self.artifact_writer.write_artifact(&file_name, &content)?);
        }
        self.progress_reporter.report_progress(total, total, None);

        for artifact in &artifacts {
            self.progress_reporter
                .report(&format!("✅ Wrote {}", artifact.display()));
        }

        let images = if request.render_images {
            self.rasterize(&artifacts[1..]).await?
        } else {
            debug!("Image rendering disabled");
            Vec::new()
        };

        self.present_report(analysis)?;

        Ok(RenderResponse { artifacts, images })
    }

    async fn rasterize(&self, diagrams: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if !self.rasterizer.is_available().await {
            self.progress_reporter.report_warning(
                "Graphviz (dot) is not installed, skipping PNG rendering. \
                 Install it from https://graphviz.org/download/ and render the .dot files manually.",
            );
            return Ok(Vec::new());
        }

        self.progress_reporter
            .report(&format!("🖼️  Rendering {} diagram(s) with Graphviz", diagrams.len()));
        let images = try_join_all(diagrams.iter().map(|d| self.rasterizer.rasterize(d))).await?;

        for image in &images {
            self.progress_reporter
                .report(&format!("✅ Rendered {}", image.display()));
        }
        Ok(images)
    }

    fn present_report(&self, analysis: &AnalysisResponse) -> Result<()> {
        let formatter = FormatterFactory::create(FormatterType::Report);
        let mut report = formatter.format(&analysis.original)?;
        report.push_str(&formatter.format(&analysis.reduced)?);
        self.output_presenter.present(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{AnalysisMetadata, GraphReadModelBuilder, Snapshot};
    use crate::graph_analysis::domain::PackageRecord;
    use crate::graph_analysis::services::{EdgeReducer, GraphBuilder, UsageIndexer};
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryWriter {
        files: RefCell<Vec<(String, String)>>,
    }

    impl ArtifactWriter for &MemoryWriter {
        fn write_artifact(&self, file_name: &str, content: &str) -> Result<PathBuf> {
            self.files
                .borrow_mut()
                .push((file_name.to_string(), content.to_string()));
            Ok(PathBuf::from("out").join(file_name))
        }
    }

    #[derive(Default)]
    struct MemoryPresenter {
        output: RefCell<String>,
    }

    impl OutputPresenter for &MemoryPresenter {
        fn present(&self, content: &str) -> Result<()> {
            self.output.borrow_mut().push_str(content);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        warnings: RefCell<Vec<String>>,
    }

    impl ProgressReporter for &RecordingReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_warning(&self, message: &str) {
            self.warnings.borrow_mut().push(message.to_string());
        }
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    struct FakeRasterizer {
        available: bool,
        rendered: Mutex<Vec<PathBuf>>,
    }

    impl FakeRasterizer {
        fn new(available: bool) -> Self {
            Self {
                available,
                rendered: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DiagramRasterizer for FakeRasterizer {
        async fn is_available(&self) -> bool {
            self.available
        }

        async fn rasterize(&self, source: &Path) -> Result<PathBuf> {
            self.rendered.lock().unwrap().push(source.to_path_buf());
            Ok(source.with_extension("png"))
        }
    }

    fn create_analysis() -> AnalysisResponse {
        let records = vec![
            PackageRecord::new("A", "1.0.0")
                .with_dependency("B", "1.0.0")
                .with_dependency("C", "1.0.0"),
            PackageRecord::new("B", "1.0.0").with_dependency("C", "1.0.0"),
            PackageRecord::new("C", "1.0.0"),
        ];
        let metadata = AnalysisMetadata::generate("nuget-depgraph", "0.1.0");
        let mut graph = GraphBuilder::default().build(&records).unwrap();
        UsageIndexer::index(&mut graph);
        let original_graph = graph.clone();
        let original =
            GraphReadModelBuilder::build(&original_graph, Snapshot::Original, "", 10, &metadata, None);
        let reduction = EdgeReducer::reduce(&mut graph);
        let reduced = GraphReadModelBuilder::build(
            &graph,
            Snapshot::Reduced,
            "",
            10,
            &metadata,
            Some(&reduction),
        );
        AnalysisResponse {
            original_graph,
            reduced_graph: graph,
            reduction,
            original,
            reduced,
        }
    }

    #[tokio::test]
    async fn test_execute_writes_all_artifacts() {
        let writer = MemoryWriter::default();
        let presenter = MemoryPresenter::default();
        let reporter = RecordingReporter::default();
        let rasterizer = FakeRasterizer::new(true);
        let use_case = RenderOutputsUseCase::new(&writer, &presenter, &reporter, rasterizer);

        let response = use_case
            .execute(&create_analysis(), &RenderRequest::default())
            .await
            .unwrap();

        let files = writer.files.borrow();
        let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "dependencies-matrix.csv",
                "dependencies-original.dot",
                "dependencies-reduced.dot"
            ]
        );
        // The matrix describes the original graph, A -> C included
        assert_eq!(files[0].1.lines().nth(1), Some("A,,dependency,dependency"));
        assert!(files[1].1.contains("n0 -> n2"));
        assert!(!files[2].1.contains("n0 -> n2"));

        assert_eq!(response.artifacts.len(), 3);
        assert_eq!(
            response.images,
            vec![
                PathBuf::from("out/dependencies-original.png"),
                PathBuf::from("out/dependencies-reduced.png")
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_presents_both_reports() {
        let writer = MemoryWriter::default();
        let presenter = MemoryPresenter::default();
        let reporter = RecordingReporter::default();
        let use_case =
            RenderOutputsUseCase::new(&writer, &presenter, &reporter, FakeRasterizer::new(true));

        use_case
            .execute(&create_analysis(), &RenderRequest::default())
            .await
            .unwrap();

        let output = presenter.output.borrow();
        assert!(output.contains("Dependency report: original graph"));
        assert!(output.contains("Dependency report: reduced graph"));
        assert!(output.contains("A -> C 1.0.0 (reachable through B)"));
    }

    #[tokio::test]
    async fn test_execute_without_graphviz_warns() {
        let writer = MemoryWriter::default();
        let presenter = MemoryPresenter::default();
        let reporter = RecordingReporter::default();
        let use_case =
            RenderOutputsUseCase::new(&writer, &presenter, &reporter, FakeRasterizer::new(false));

        let response = use_case
            .execute(&create_analysis(), &RenderRequest::default())
            .await
            .unwrap();

        assert!(response.images.is_empty());
        assert_eq!(reporter.warnings.borrow().len(), 1);
        assert!(reporter.warnings.borrow()[0].contains("Graphviz"));
    }

    #[tokio::test]
    async fn test_execute_with_rendering_disabled() {
        let writer = MemoryWriter::default();
        let presenter = MemoryPresenter::default();
        let reporter = RecordingReporter::default();
        let rasterizer = FakeRasterizer::new(true);
        let use_case = RenderOutputsUseCase::new(&writer, &presenter, &reporter, rasterizer);

        let request = RenderRequest {
            render_images: false,
            file_stem: "solution".to_string(),
            matrix_format: crate::application::dto::MatrixFormat::Markdown,
            ..RenderRequest::default()
        };
        let response = use_case.execute(&create_analysis(), &request).await.unwrap();

        assert!(response.images.is_empty());
        assert!(reporter.warnings.borrow().is_empty());
        assert_eq!(writer.files.borrow()[0].0, "solution-matrix.md");
        assert!(use_case.rasterizer.rendered.lock().unwrap().is_empty());
    }
}
