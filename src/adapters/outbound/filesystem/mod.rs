/// Filesystem adapters: lock file input, artifact files and the stdout report
mod file_reader;
mod file_writer;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
