//! On-disk store for mini-commits
//!
//! Manages the `mini-commits/` directory inside the repository's git dir:
//! ```text
//! .git/mini-commits/
//!   index.json      # ordered list of every record, patch included
//!   index.lock      # advisory lock file
//!   <id>.patch      # raw patch per record
//! ```
//!
//! The index is the only source read by lookups; patch files are kept as a
//! per-record copy and are removed together with their index entry. Nothing is
//! cached between calls, so changes made by other processes are always seen.

use crate::error::{Result, StoreError};
use crate::lock::{IndexLock, LockMode};
use crate::record::MiniCommit;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name inside the git dir
pub const STORE_DIR: &str = "mini-commits";
/// Index file name
pub const INDEX_FILE: &str = "index.json";
/// Advisory lock file name
pub const LOCK_FILE: &str = "index.lock";
/// Extension of per-record patch files
pub const PATCH_EXT: &str = "patch";

/// Mini-commit store
///
/// Safe to share between threads (`Arc<Store>`): reads run concurrently,
/// `create`/`delete`/`clear` are exclusive.
pub struct Store {
    /// Path to the mini-commits directory
    dir: PathBuf,
    /// Guards index and patch files within this process
    lock: RwLock<()>,
}

impl Store {
    /// Open the store of the repository rooted at `repo_root`
    ///
    /// Creates `.git/mini-commits/` if needed.
    pub fn open(repo_root: &Path) -> Result<Self> {
        let git_dir = resolve_git_dir(repo_root)?;
        Self::at(git_dir.join(STORE_DIR))
    }

    /// Open a store directly at `dir`, creating it if needed
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::StorageUnavailable {
            op: "create storage directory",
            path: dir.clone(),
            source,
        })?;

        debug!("Opened mini-commit store at {}", dir.display());

        Ok(Self {
            dir,
            lock: RwLock::new(()),
        })
    }

    /// Snapshot `patch` as a new mini-commit
    ///
    /// The index is persisted before the patch file. If the patch file cannot
    /// be written the index entry is kept and the error is returned.
    pub fn create(
        &self,
        message: &str,
        created_at: DateTime<Utc>,
        patch: &str,
    ) -> Result<MiniCommit> {
        let record = MiniCommit::new(message, created_at, patch);

        let _guard = self.lock.write();
        let _index_lock = self.lock_index(LockMode::Exclusive)?;

        let mut index = self.load_index()?;
        if index.iter().any(|mc| mc.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }

        index.push(record.clone());
        self.save_index(&index)?;
        self.write_patch(&record)?;

        debug!(
            "Created mini-commit {} ({} bytes, {} total)",
            record.short_id(),
            record.patch.len(),
            index.len()
        );
        Ok(record)
    }

    /// All mini-commits in insertion order
    pub fn list(&self) -> Result<Vec<MiniCommit>> {
        let _guard = self.lock.read();
        let _index_lock = self.lock_index(LockMode::Shared)?;
        self.load_index()
    }

    /// Look up a mini-commit by its full id
    pub fn get(&self, id: &str) -> Result<MiniCommit> {
        let _guard = self.lock.read();
        let _index_lock = self.lock_index(LockMode::Shared)?;

        self.load_index()?
            .into_iter()
            .find(|mc| mc.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// All mini-commits whose id starts with `prefix`, in insertion order
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<MiniCommit>> {
        let _guard = self.lock.read();
        let _index_lock = self.lock_index(LockMode::Shared)?;

        Ok(self
            .load_index()?
            .into_iter()
            .filter(|mc| mc.id.starts_with(prefix))
            .collect())
    }

    /// Delete a mini-commit and its patch file
    ///
    /// The index is rewritten first. A patch file that is already gone is
    /// fine; any other removal failure is returned even though the record has
    /// left the index.
    pub fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock.write();
        let _index_lock = self.lock_index(LockMode::Exclusive)?;

        let index = self.load_index()?;
        let before = index.len();
        let remaining: Vec<MiniCommit> = index.into_iter().filter(|mc| mc.id != id).collect();

        if remaining.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.save_index(&remaining)?;
        self.remove_patch(id)?;

        debug!("Deleted mini-commit {} ({} left)", id, remaining.len());
        Ok(())
    }

    /// Delete every mini-commit, returning how many were removed
    pub fn clear(&self) -> Result<usize> {
        let _guard = self.lock.write();
        let _index_lock = self.lock_index(LockMode::Exclusive)?;

        let index = self.load_index()?;
        for mc in &index {
            self.remove_patch(&mc.id)?;
        }
        self.save_index(&[])?;

        debug!("Cleared {} mini-commits", index.len());
        Ok(index.len())
    }

    /// Path to the mini-commits directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to the index file
    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    /// Path to the patch file of `id`
    pub fn patch_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", id, PATCH_EXT))
    }

    fn lock_index(&self, mode: LockMode) -> Result<IndexLock> {
        IndexLock::acquire(&self.dir.join(LOCK_FILE), mode)
    }

    /// Read the index; a missing file is an empty store
    fn load_index(&self) -> Result<Vec<MiniCommit>> {
        let path = self.index_path();

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::StorageUnavailable {
                    op: "read index",
                    path,
                    source,
                })
            }
        };

        // Older indexes store an empty list as `null`
        let index: Option<Vec<MiniCommit>> = serde_json::from_slice(&data)
            .map_err(|source| StoreError::CorruptIndex { path, source })?;
        Ok(index.unwrap_or_default())
    }

    fn save_index(&self, index: &[MiniCommit]) -> Result<()> {
        let path = self.index_path();

        let data = serde_json::to_vec_pretty(index).map_err(|e| StoreError::StorageUnavailable {
            op: "serialize index",
            path: path.clone(),
            source: e.into(),
        })?;

        atomic_write(&self.dir, &path, &data).map_err(|source| {
            StoreError::StorageUnavailable {
                op: "write index",
                path,
                source,
            }
        })
    }

    fn write_patch(&self, record: &MiniCommit) -> Result<()> {
        let path = self.patch_path(&record.id);
        fs::write(&path, record.patch.as_bytes()).map_err(|source| {
            StoreError::PayloadWriteFailure {
                op: "write",
                id: record.id.clone(),
                path,
                source,
            }
        })
    }

    fn remove_patch(&self, id: &str) -> Result<()> {
        let path = self.patch_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Patch file already missing: {}", path.display());
                Ok(())
            }
            Err(source) => Err(StoreError::PayloadWriteFailure {
                op: "remove",
                id: id.to_string(),
                path,
                source,
            }),
        }
    }
}

/// Locate the git dir of `repo_root`
///
/// `.git` is usually a directory; linked worktrees and submodules use a
/// `.git` file containing `gitdir: <path>`.
pub fn resolve_git_dir(repo_root: &Path) -> Result<PathBuf> {
    let dot_git = repo_root.join(".git");

    if dot_git.is_dir() {
        return Ok(dot_git);
    }

    if dot_git.is_file() {
        let contents = fs::read_to_string(&dot_git).map_err(|source| {
            StoreError::StorageUnavailable {
                op: "read",
                path: dot_git.clone(),
                source,
            }
        })?;

        if let Some(target) = contents.trim().strip_prefix("gitdir:") {
            let target = Path::new(target.trim());
            return Ok(if target.is_absolute() {
                target.to_path_buf()
            } else {
                repo_root.join(target)
            });
        }
    }

    Err(StoreError::NotAWorkingTree {
        path: repo_root.to_path_buf(),
    })
}

/// Atomic write helper
///
/// Writes data to a temporary file in `dir`, fsyncs it, then renames it over
/// `target`. Readers see either the old or the new contents, never a mix.
///
/// On Unix the result keeps the mode of an existing `target`; a new one gets
/// the same mode a plain `fs::write` would (0666 minus umask).
pub fn atomic_write(dir: &Path, target: &Path, data: &[u8]) -> io::Result<()> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".index-").suffix(".tmp");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir)?;

    #[cfg(unix)]
    if let Ok(existing) = fs::metadata(target) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }

    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
