//! # Error Types
//!
//! Errors that can occur around a validation run. The engine itself never
//! fails: malformed input is reported as [`crate::Diagnostic`]s. These
//! errors cover loading documents before they reach the engine.

use std::path::PathBuf;

use thiserror::Error;

/// Task-file extension, including the leading dot.
pub const TASK_FILE_EXTENSION: &str = ".task.md";

/// Top-level error type for taskcheck.
#[derive(Error, Debug)]
pub enum TaskcheckError {
    /// The path does not name a task file.
    #[error("not a task file (expected a name ending in '.task.md'): {}", .0.display())]
    NotATaskFile(PathBuf),

    /// The file content is not valid UTF-8.
    #[error("invalid UTF-8 in {}: {reason}", .path.display())]
    InvalidUtf8 {
        /// File that failed to decode.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
