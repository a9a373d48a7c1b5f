use super::MatrixFormat;
use std::path::PathBuf;

/// Default Graphviz layout engine for dependency diagrams
pub const DEFAULT_LAYOUT: &str = "twopi";

/// RenderRequest - Options for writing diagrams, matrix and report
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Stem of every artifact file name (`<stem>-original.dot`, ...)
    pub file_stem: String,
    pub matrix_format: MatrixFormat,
    /// Graphviz layout engine written into the diagrams
    pub layout: String,
    /// Rasterize diagrams to PNG when Graphviz is available
    pub render_images: bool,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            file_stem: "dependencies".to_string(),
            matrix_format: MatrixFormat::default(),
            layout: DEFAULT_LAYOUT.to_string(),
            render_images: true,
        }
    }
}

/// RenderResponse - Files produced by the render use case
#[derive(Debug, Clone, Default)]
pub struct RenderResponse {
    /// Text artifacts in write order: matrix, original diagram, reduced diagram
    pub artifacts: Vec<PathBuf>,
    /// Rasterized images, empty if rendering was skipped
    pub images: Vec<PathBuf>,
}
