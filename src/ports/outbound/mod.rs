/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, Graphviz).
pub mod artifact_writer;
pub mod diagram_rasterizer;
pub mod graph_formatter;
pub mod lockfile_reader;
pub mod output_presenter;
pub mod progress_reporter;

pub use artifact_writer::ArtifactWriter;
pub use diagram_rasterizer::DiagramRasterizer;
pub use graph_formatter::GraphFormatter;
pub use lockfile_reader::{LockfileParseResult, LockfileReader};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
