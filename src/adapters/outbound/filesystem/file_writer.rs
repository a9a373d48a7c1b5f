use crate::ports::outbound::{ArtifactWriter, OutputPresenter};
use crate::shared::error::AppError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// FileSystemWriter adapter writing artifacts into one output directory
pub struct FileSystemWriter {
    output_dir: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validates that the output directory exists and is a directory
    fn validate_output_dir(&self, target: &Path) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Ok(());
        }

        if !self.output_dir.is_dir() {
            return Err(AppError::FileWriteError {
                path: target.to_path_buf(),
                details: format!(
                    "Output directory does not exist: {}",
                    self.output_dir.display()
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Only a single normal path component is accepted as a file name
    fn validate_file_name(&self, file_name: &str) -> Result<()> {
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(AppError::InvalidPath {
                path: PathBuf::from(file_name),
                reason: "Artifact names must be plain file names".to_string(),
            }
            .into()),
        }
    }

    /// Rejects writing through an existing symbolic link
    fn validate_output_security(&self, target: &Path) -> Result<()> {
        if fs::symlink_metadata(target).is_ok() {
            validate_not_symlink(target, "write").map_err(|e| AppError::FileWriteError {
                path: target.to_path_buf(),
                details: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl ArtifactWriter for FileSystemWriter {
    fn write_artifact(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        self.validate_file_name(file_name)?;
        let target = self.output_dir.join(file_name);

        self.validate_output_dir(&target)?;
        self.validate_output_security(&target)?;

        fs::write(&target, content).map_err(|e| AppError::FileWriteError {
            path: target.clone(),
            details: e.to_string(),
        })?;

        debug!("Wrote {} bytes to {}", content.len(), target.display());
        Ok(target)
    }
}

/// StdoutPresenter adapter for writing output to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
