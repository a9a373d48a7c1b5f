use nuget_depgraph::adapters::outbound::assets::ProjectAssetsParser;
use nuget_depgraph::prelude::*;
use std::path::Path;

/// Mock LockfileReader serving in-memory project.assets.json content
pub struct MockLockfileReader {
    pub content: String,
    pub should_fail: bool,
}

impl MockLockfileReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl LockfileReader for MockLockfileReader {
    fn read_lockfile(&self, _path: &Path) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock lock file read failure");
        }
        Ok(self.content.clone())
    }

    fn read_and_parse_lockfile(
        &self,
        path: &Path,
        target_framework: Option<&str>,
    ) -> Result<LockfileParseResult> {
        ProjectAssetsParser::parse(&self.read_lockfile(path)?, target_framework)
    }
}
