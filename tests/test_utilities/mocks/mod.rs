/// Mock implementations for testing
mod mock_lockfile_reader;
mod mock_progress_reporter;

pub use mock_lockfile_reader::MockLockfileReader;
pub use mock_progress_reporter::MockProgressReporter;
