//! Error types for the mini-commit store

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`crate::Store`] operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No `.git` entry at the repository root
    #[error("not a git repository: {}", path.display())]
    NotAWorkingTree { path: PathBuf },

    /// Storage directory, index or lock file could not be accessed
    #[error("failed to {op} {}", path.display())]
    StorageUnavailable {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The index file exists but is not a valid record list
    #[error("corrupt index {}", path.display())]
    CorruptIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No record with this id
    #[error("mini-commit '{0}' not found")]
    NotFound(String),

    /// A record with this id is already stored
    #[error("mini-commit '{0}' already exists")]
    DuplicateId(String),

    /// Patch file could not be written or removed
    #[error("failed to {op} patch file for '{id}' at {}", path.display())]
    PayloadWriteFailure {
        op: &'static str,
        id: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True for lookups against an unknown id
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
