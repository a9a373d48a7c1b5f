use crate::adapters::outbound::assets::ProjectAssetsParser;
use crate::ports::outbound::{LockfileParseResult, LockfileReader};
use crate::shared::error::AppError;
use crate::shared::security::{validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading lock files from the file system
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a file after rejecting symbolic links, non-regular files and
    /// files above the size limit
    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        validate_regular_file(path, file_type, MAX_FILE_SIZE)?;

        fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_type, e))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileReader for FileSystemReader {
    fn read_lockfile(&self, lockfile_path: &Path) -> Result<String> {
        if !lockfile_path.exists() {
            return Err(AppError::LockfileNotFound {
                path: lockfile_path.to_path_buf(),
                suggestion: "Run `dotnet restore` to generate obj/project.assets.json, \
                             or pass the path of an existing lock file as the first argument."
                    .to_string(),
            }
            .into());
        }

        self.safe_read_file(lockfile_path, "lock file").map_err(|e| {
            AppError::LockfileParseError {
                path: lockfile_path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn read_and_parse_lockfile(
        &self,
        lockfile_path: &Path,
        target_framework: Option<&str>,
    ) -> Result<LockfileParseResult> {
        let content = self.read_lockfile(lockfile_path)?;

        ProjectAssetsParser::parse(&content, target_framework).map_err(|e| {
            if e.is::<AppError>() {
                e
            } else {
                AppError::LockfileParseError {
                    path: lockfile_path.to_path_buf(),
                    details: e.to_string(),
                }
                .into()
            }
        })
    }
}
