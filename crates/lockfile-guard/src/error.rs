//! Error types for lockfile-guard

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while inspecting a lock file
#[derive(Error, Debug)]
pub enum LockError {
    /// Lock file could not be read
    #[error("Lock file not readable at {path:?}: {source}")]
    LockFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No checksum snapshot was recorded
    #[error("No stored checksum at {0:?}")]
    SnapshotMissing(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
