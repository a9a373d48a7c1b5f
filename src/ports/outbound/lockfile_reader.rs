use crate::graph_analysis::domain::PackageRecord;
use crate::shared::Result;
use std::path::Path;

/// Records parsed from a lock file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockfileParseResult {
    pub records: Vec<PackageRecord>,
    /// Every target framework present in the file, in file order
    pub target_frameworks: Vec<String>,
}

/// LockfileReader port for reading lock-file contents
///
/// This port abstracts the file system operations needed to read
/// a `project.assets.json` file and turn it into package records.
pub trait LockfileReader {
    /// Reads the lock file at `lockfile_path`
    ///
    /// # Returns
    /// The raw content of the lock file as a string
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist
    /// - The file is a symbolic link, not a regular file, or too large
    /// - The file cannot be read due to permissions or I/O errors
    fn read_lockfile(&self, lockfile_path: &Path) -> Result<String>;

    /// Reads and parses the lock file at `lockfile_path`
    ///
    /// # Arguments
    /// * `target_framework` - Only read this target; `None` reads all targets
    ///
    /// # Errors
    /// Returns an error if reading fails, the content is not a valid lock
    /// file, or the requested target framework is not present
    fn read_and_parse_lockfile(
        &self,
        lockfile_path: &Path,
        target_framework: Option<&str>,
    ) -> Result<LockfileParseResult>;
}
