//! Lock file checksum snapshots
//!
//! `--preci` writes the SHA256 of the lock file to [`DIGEST_FILE`];
//! `--postci` recomputes it and compares. The lock file is trimmed before
//! hashing so trailing newline churn from different editors does not count as
//! drift.

use crate::error::LockError;
use crate::{lockfile_path, LockDigest, LockStatus, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Side-channel file holding the snapshot digest
pub const DIGEST_FILE: &str = ".package-lock-hash";

/// Hash trimmed lock file contents
pub fn compute_digest(contents: &str) -> LockDigest {
    let mut hasher = Sha256::new();
    hasher.update(contents.trim().as_bytes());
    LockDigest::new(hex::encode(hasher.finalize()))
}

/// Read and hash a lock file
pub fn digest_lockfile(path: &Path) -> Result<LockDigest> {
    let contents = std::fs::read_to_string(path).map_err(|source| LockError::LockFileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(compute_digest(&contents))
}

/// Content-checksum drift guard for one lock file.
///
/// [`snapshot`](Self::snapshot) runs at the start of a pipeline and never
/// fails the caller; [`verify`](Self::verify) runs at the end and folds every
/// failure into [`LockStatus`].
#[derive(Debug, Clone)]
pub struct ChecksumStore {
    lockfile: PathBuf,
    digest_file: PathBuf,
}

impl ChecksumStore {
    /// Guard `lockfile` inside `root`, storing the snapshot next to it.
    pub fn new(root: &Path, lockfile: &str) -> Self {
        ChecksumStore {
            lockfile: lockfile_path(root, lockfile),
            digest_file: root.join(DIGEST_FILE),
        }
    }

    /// Path of the guarded lock file
    pub fn lockfile(&self) -> &Path {
        &self.lockfile
    }

    /// Compute the digest and overwrite the snapshot file.
    pub fn try_snapshot(&self) -> Result<LockDigest> {
        let digest = digest_lockfile(&self.lockfile)?;
        std::fs::write(&self.digest_file, digest.as_str())?;
        info!(
            "Saved lock checksum {} to {:?}",
            digest.short(),
            self.digest_file
        );
        Ok(digest)
    }

    /// Read the previously stored digest.
    pub fn stored_digest(&self) -> Result<LockDigest> {
        match std::fs::read_to_string(&self.digest_file) {
            Ok(contents) => Ok(LockDigest::new(contents.trim())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(LockError::SnapshotMissing(self.digest_file.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn compare(&self) -> Result<bool> {
        let stored = self.stored_digest()?;
        let current = digest_lockfile(&self.lockfile)?;
        debug!(
            "Lock checksum stored={} current={}",
            stored.short(),
            current.short()
        );
        Ok(stored == current)
    }

    /// Record the lock file digest, logging instead of failing.
    pub fn snapshot(&self) {
        if let Err(err) = self.try_snapshot() {
            warn!("Lock checksum snapshot skipped: {}", err);
        }
    }

    /// Compare the lock file against the recorded digest.
    pub fn verify(&self) -> LockStatus {
        match self.compare() {
            Ok(true) => LockStatus::Unchanged,
            Ok(false) => LockStatus::Drifted,
            Err(err) => {
                warn!("Lock checksum comparison failed: {}", err);
                LockStatus::Unconfirmed(err.to_string())
            }
        }
    }
}
