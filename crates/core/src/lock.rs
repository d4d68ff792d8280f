//! Advisory file lock around index read-modify-write cycles
//!
//! The in-process `RwLock` in [`crate::Store`] only serializes threads of one
//! process. Separate CLI invocations coordinate through `flock(2)` on
//! `index.lock`: shared for reads, exclusive for mutations. On platforms
//! without `flock` the lock is a no-op and concurrent processes fall back to
//! last-writer-wins on the index.

use crate::error::{Result, StoreError};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Lock mode requested on the index lock file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// Held advisory lock; released on drop
pub struct IndexLock {
    file: Option<File>,
    mode: LockMode,
}

impl IndexLock {
    /// Block until the lock at `path` is held in `mode`
    ///
    /// A shared lock that cannot even open the lock file (read-only
    /// repository) proceeds unlocked so listing still works.
    pub fn acquire(path: &Path, mode: LockMode) -> Result<Self> {
        let file = match OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)
        {
            Ok(file) => file,
            Err(e) if mode == LockMode::Shared => {
                tracing::debug!("Reading without index lock ({}): {}", path.display(), e);
                return Ok(Self { file: None, mode });
            }
            Err(source) => {
                return Err(StoreError::StorageUnavailable {
                    op: "open lock file",
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        flock(&file, mode).map_err(|source| StoreError::StorageUnavailable {
            op: "lock",
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            file: Some(file),
            mode,
        })
    }

    /// Mode this lock was requested in
    pub fn mode(&self) -> LockMode {
        self.mode
    }

    /// Whether an OS-level lock is actually held
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for IndexLock {
    fn drop(&mut self) {
        // Closing the descriptor releases the lock as well
        if let Some(file) = &self.file {
            let _ = unlock(file);
        }
    }
}

#[cfg(unix)]
fn flock(file: &File, mode: LockMode) -> std::io::Result<()> {
    use nix::errno::Errno;
    use nix::fcntl::FlockArg;
    use std::os::unix::io::AsRawFd;

    let arg = match mode {
        LockMode::Shared => FlockArg::LockShared,
        LockMode::Exclusive => FlockArg::LockExclusive,
    };

    loop {
        match nix::fcntl::flock(file.as_raw_fd(), arg) {
            Ok(()) => return Ok(()),
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn unlock(file: &File) -> std::io::Result<()> {
    use nix::fcntl::FlockArg;
    use std::os::unix::io::AsRawFd;

    nix::fcntl::flock(file.as_raw_fd(), FlockArg::Unlock).map_err(Into::into)
}

#[cfg(not(unix))]
fn flock(_file: &File, _mode: LockMode) -> std::io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn unlock(_file: &File) -> std::io::Result<()> {
    Ok(())
}
