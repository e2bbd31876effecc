use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the punchcard pipeline.
///
/// Only the two directory conditions are fatal to a run; row- and
/// file-level problems are collected as [`crate::models::ErrorLog`]
/// entries instead and never surface as a Rust error.
#[derive(Error, Debug)]
pub enum AttendanceError {
    /// The configured log folder does not exist.
    #[error("Error folder '{0}' does not exist.")]
    LogFolderMissing(PathBuf),

    /// The log folder exists but holds no `.log` / `.csv` files.
    #[error("No log files found in '{0}'.")]
    NoLogFiles(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A delimited file could not be parsed past the row level.
    #[error("Failed to parse delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// A summary or search result could not be serialised.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AttendanceError {
    /// Whether this error must halt the run: the log folder is missing,
    /// or it holds no eligible files.
    pub fn is_fatal_directory(&self) -> bool {
        matches!(
            self,
            AttendanceError::LogFolderMissing(_) | AttendanceError::NoLogFiles(_)
        )
    }
}

/// Convenience alias used throughout the punchcard crates.
pub type Result<T> = std::result::Result<T, AttendanceError>;
