//! Persistence error types.
//!
//! All persistence operations return structured errors that carry the path
//! involved and an optional remediation hint for the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistError {
    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV writer or reader rejected the table.
    #[error("failed to {operation} CSV table {path}: {message}")]
    Csv {
        operation: &'static str,
        path: PathBuf,
        message: String,
    },

    /// The validation report could not be encoded or decoded as JSON.
    #[error("failed to {operation} validation report {path}")]
    Serialization {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to move {temp_path} into place at {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Io { operation, .. } if *operation == "read" => {
                Some("Check that the file exists. Run `basket run` to produce it.")
            }
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                Some("Check disk space and write permissions of the output directory.")
            }
            Self::Csv { .. } | Self::Serialization { .. } => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;
