//! SHA-1 content identifiers for mini-commits

use chrono::{DateTime, SecondsFormat, Utc};
use sha1::{Digest, Sha1};

/// Length of a full mini-commit id (hex-encoded SHA-1)
pub const ID_HEX_LEN: usize = 40;

/// Default length of the abbreviated id shown to users
pub const SHORT_ID_LEN: usize = 8;

/// Derive the id of a mini-commit from its patch and creation time
///
/// The patch bytes are hashed first, followed by the timestamp rendered as
/// RFC 3339 with nanosecond precision. The function is pure: the same
/// `(patch, created_at)` pair always yields the same id.
pub fn generate_id(patch: &str, created_at: &DateTime<Utc>) -> String {
    let mut hasher = Sha1::new();
    hasher.update(patch.as_bytes());
    hasher.update(format_timestamp(created_at).as_bytes());
    hex::encode(hasher.finalize())
}

/// Render a timestamp the way it is fed into [`generate_id`]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Check whether `s` looks like a full id (40 lowercase hex characters)
pub fn is_valid_id(s: &str) -> bool {
    s.len() == ID_HEX_LEN && is_hex_prefix(s)
}

/// Check whether `s` could be the beginning of an id
pub fn is_hex_prefix(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Abbreviate an id for display, never splitting a character
pub fn short_id(id: &str, len: usize) -> &str {
    match id.char_indices().nth(len) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
