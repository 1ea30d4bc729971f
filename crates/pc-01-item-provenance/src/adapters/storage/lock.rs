//! # Store Lock
//!
//! Exclusive advisory lock on a ledger file, held for the lifetime of the
//! store that owns it. Uses `fs2` (flock on Unix, LockFile on Windows).
//!
//! The lock lives in a sibling `<store>.lock` file so the store file itself
//! can be replaced by rename while the lock is held.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::errors::KVStoreError;

/// Exclusive lock on one store file. Released on drop.
#[derive(Debug)]
pub(crate) struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Take the lock for `store_path` without waiting.
    ///
    /// ## Errors
    ///
    /// - `AlreadyLocked`: another handle, in this or another process, holds it
    /// - `IOError`: the lock file could not be created
    pub(crate) fn acquire(store_path: &Path) -> Result<Self, KVStoreError> {
        let path = sibling(store_path, ".lock");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| KVStoreError::IOError {
                message: format!("{}: {}", parent.display(), e),
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| KVStoreError::IOError {
                message: format!("{}: {}", path.display(), e),
            })?;

        if file.try_lock_exclusive().is_err() {
            tracing::warn!("[pc-01] 🔒 Store already locked: {}", path.display());
            return Err(KVStoreError::AlreadyLocked {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("[pc-01] 🔒 Acquired store lock {}", path.display());
        Ok(Self { file, path })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // The lock file stays: removing it would let a waiter lock a dead inode
        let _ = self.file.unlock();
        tracing::debug!("[pc-01] 🔓 Released store lock {}", self.path.display());
    }
}

/// `path` with `suffix` appended to its final component.
pub(crate) fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
