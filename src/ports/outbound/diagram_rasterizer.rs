use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// DiagramRasterizer port for turning a diagram description into an image
///
/// Rasterizing shells out to an external tool, so the port is async to let
/// callers render several diagrams concurrently.
#[async_trait]
pub trait DiagramRasterizer: Send + Sync {
    /// Returns true if the external renderer is installed and runnable
    async fn is_available(&self) -> bool;

    /// Renders the diagram at `source` into an image next to it
    ///
    /// # Returns
    /// Path of the generated image
    ///
    /// # Errors
    /// Returns an error if the renderer fails, exits unsuccessfully or
    /// exceeds its timeout
    async fn rasterize(&self, source: &Path) -> Result<PathBuf>;
}
