//! Mini-commit record

use crate::hash::{self, SHORT_ID_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named snapshot of staged changes
///
/// Serialized into the index as `{"id", "message", "createdAt", "patch"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniCommit {
    /// Hex SHA-1 of patch + creation time
    pub id: String,
    /// User supplied message
    pub message: String,
    /// Creation time, never mutated
    pub created_at: DateTime<Utc>,
    /// Staged diff captured at creation
    pub patch: String,
}

impl MiniCommit {
    /// Build a record, deriving its id from the patch and timestamp
    pub fn new(
        message: impl Into<String>,
        created_at: DateTime<Utc>,
        patch: impl Into<String>,
    ) -> Self {
        let patch = patch.into();
        Self {
            id: hash::generate_id(&patch, &created_at),
            message: message.into(),
            created_at,
            patch,
        }
    }

    /// Abbreviated id for display
    pub fn short_id(&self) -> &str {
        hash::short_id(&self.id, SHORT_ID_LEN)
    }
}
