use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish argument errors from
/// failures that happened while analyzing the lock file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - all outputs were produced
    Success = 0,
    /// Application error (lock file, parse, graph or file I/O error)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Errors raised by the in-memory dependency graph core.
///
/// The core never logs or swallows these; callers that receive one from
/// indexing or reduction should discard the graph and rebuild it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A package record is missing a required field or carries an unusable value.
    #[error("Malformed package record #{index} ({name}): {reason}")]
    MalformedRecord {
        index: usize,
        name: String,
        reason: String,
    },

    /// An aggregate that is undefined over zero packages was requested.
    #[error("Cannot compute {operation} over an empty graph")]
    EmptyGraph { operation: &'static str },

    /// The same package name was supplied twice under the `reject` duplicate policy.
    #[error("Duplicate package '{name}' (versions {first_version} and {second_version})")]
    DuplicatePackage {
        name: String,
        first_version: String,
        second_version: String,
    },
}

/// Application-level errors surfaced to the user.
///
/// Uses thiserror to derive Display and Error, keeping the hint text
/// next to the variant it belongs to.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Lock file not found: {path}\n\n💡 Hint: {suggestion}")]
    LockfileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse lock file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a valid project.assets.json produced by a NuGet restore")]
    LockfileParseError { path: PathBuf, details: String },

    #[error("Target framework '{requested}' not found in lock file\n\n💡 Hint: Available target frameworks: {available}")]
    UnknownTargetFramework { requested: String, available: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project.assets.json file")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Graphviz failed to render {path}\nDetails: {details}\n\n💡 Hint: Check the layout engine name or render the .dot file manually")]
    RenderError { path: PathBuf, details: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },
}
