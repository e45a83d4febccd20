//! Lockfile-Guard: lockfile drift detection for NVM-Shield
//!
//! Detects changes to a dependency lock file (`package-lock.json` by default)
//! between two stages of a CI pipeline. [`ChecksumStore`] snapshots a SHA256
//! digest of the lock file before the pipeline runs and compares it
//! afterwards.
//!
//! Verification fails closed: anything that prevents confirming the lock file
//! is unchanged is reported as [`LockStatus::Unconfirmed`].

pub mod checksum;
pub mod error;

pub use checksum::{compute_digest, digest_lockfile, ChecksumStore, DIGEST_FILE};
pub use error::LockError;

use std::path::{Path, PathBuf};

/// Result type for lockfile-guard operations
pub type Result<T> = std::result::Result<T, LockError>;

/// Default lock file guarded when none is configured
pub const DEFAULT_LOCKFILE: &str = "package-lock.json";

/// Hex-encoded SHA256 digest of a lock file's trimmed contents
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LockDigest(String);

impl LockDigest {
    /// Wrap an already hex-encoded digest.
    pub fn new(hex: impl Into<String>) -> Self {
        LockDigest(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get short digest (first 12 characters)
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl std::fmt::Display for LockDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Verdict of a post-pipeline lock file check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockStatus {
    /// The lock file matches the snapshot
    Unchanged,
    /// The lock file was modified
    Drifted,
    /// The check could not run to completion; treated as drift
    Unconfirmed(String),
}

impl LockStatus {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, LockStatus::Unchanged)
    }
}

pub(crate) fn lockfile_path(root: &Path, lockfile: &str) -> PathBuf {
    root.join(lockfile)
}
