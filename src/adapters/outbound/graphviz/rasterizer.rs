use crate::application::dto::DEFAULT_LAYOUT;
use crate::ports::outbound::DiagramRasterizer;
use crate::shared::error::AppError;
use crate::shared::Result;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Graphviz executable looked up on PATH
const DOT_BINARY: &str = "dot";

/// Large diagrams with radial layouts can take a while
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// GraphvizRasterizer adapter invoking `dot -Tpng -K<layout>`
pub struct GraphvizRasterizer {
    binary: PathBuf,
    layout: String,
    timeout_secs: u64,
}

impl GraphvizRasterizer {
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            binary: PathBuf::from(DOT_BINARY),
            layout: layout.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Uses a specific Graphviz executable instead of `dot` on PATH
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn render_error(source: &Path, details: impl Into<String>) -> anyhow::Error {
        AppError::RenderError {
            path: source.to_path_buf(),
            details: details.into(),
        }
        .into()
    }
}

impl Default for GraphvizRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT)
    }
}

#[async_trait]
impl DiagramRasterizer for GraphvizRasterizer {
    async fn is_available(&self) -> bool {
        let status = Command::new(&self.binary)
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("{} -V failed: {}", self.binary.display(), e);
                false
            }
        }
    }

    async fn rasterize(&self, source: &Path) -> Result<PathBuf> {
        let image = source.with_extension("png");
        debug!(
            "Rasterizing {} with layout {}",
            source.display(),
            self.layout
        );

        let child = Command::new(&self.binary)
            .arg("-Tpng")
            .arg(format!("-K{}", self.layout))
            .arg(source)
            .arg("-o")
            .arg(&image)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Self::render_error(source, format!("Failed to start Graphviz: {}", e)))?;

        let output = timeout(Duration::from_secs(self.timeout_secs), child.wait_with_output())
            .await
            .map_err(|_| {
                Self::render_error(
                    source,
                    format!("Graphviz did not finish within {} seconds", self.timeout_secs),
                )
            })?
            .map_err(|e| Self::render_error(source, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Self::render_error(
                source,
                format!(
                    "Graphviz exited with code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        if !image.is_file() {
            return Err(Self::render_error(
                source,
                format!("Graphviz did not produce {}", image.display()),
            ));
        }

        Ok(image)
    }
}
