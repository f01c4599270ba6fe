//! Error types for file-system adapters

use std::path::PathBuf;

/// Errors that can occur during non-write file operations
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// File not found at the specified path
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Invalid path provided
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

/// A write that did not reach the file system
///
/// Carries the offending path so callers can report which file failed.
#[derive(Debug, thiserror::Error)]
#[error("Failed to write {}: {source}", path.display())]
pub struct FileWriteError {
    /// Path that could not be written
    pub path: PathBuf,
    /// Underlying failure
    #[source]
    pub source: std::io::Error,
}

impl FileWriteError {
    /// Wrap an io error for `path`
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}
