use crate::application::read_models::GraphReadModel;
use crate::shared::Result;

/// GraphFormatter port for rendering a graph snapshot as text
///
/// Implemented by the diagram (DOT), matrix and console report formatters.
pub trait GraphFormatter {
    /// Formats one snapshot of the dependency graph
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be rendered in this format
    fn format(&self, model: &GraphReadModel) -> Result<String>;

    /// File extension used when the output is written to disk
    fn file_extension(&self) -> &'static str;
}
