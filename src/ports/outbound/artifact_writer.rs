use crate::shared::Result;
use std::path::PathBuf;

/// ArtifactWriter port for storing named output files
///
/// Diagrams and matrices are written side by side into one output
/// location; the writer decides where that is.
pub trait ArtifactWriter {
    /// Writes `content` under `file_name` and returns the full path written
    ///
    /// # Errors
    /// Returns an error if the file name is not a plain file name, the target
    /// is a symbolic link, or the write fails
    fn write_artifact(&self, file_name: &str, content: &str) -> Result<PathBuf>;
}
