//! git-mini-commit core - persistent store for mini-commits
//!
//! This crate provides:
//! - Content-derived record ids (SHA-1 over patch + timestamp)
//! - The `MiniCommit` record
//! - The on-disk store (JSON index + one patch file per record)
//! - Advisory locking across processes

pub mod error;
pub mod hash;
pub mod lock;
pub mod record;
pub mod store;

// Re-export main types for convenience
pub use error::{Result, StoreError};
pub use hash::{generate_id, SHORT_ID_LEN};
pub use record::MiniCommit;
pub use store::Store;
