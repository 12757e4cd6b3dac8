//! Error types for tickettree-lib.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for tree operations.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A child-subtree extraction was asked for a root that does not exist
    /// in the source map. This is a caller precondition violation, not a
    /// data-quality anomaly.
    #[error("Root key not found in tree: {key}")]
    RootNotFound { key: String },

    /// Failed to parse a line in the snapshot file.
    #[error("Snapshot parse error at line {line}: {reason}")]
    SnapshotParse { line: usize, reason: String },

    /// Snapshot file not found at the specified path.
    #[error("Snapshot file not found: {0}")]
    FileNotFound(PathBuf),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using `TreeError`.
pub type Result<T> = std::result::Result<T, TreeError>;
