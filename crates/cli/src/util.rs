//! Shared utilities for CLI commands

use crate::system_config::{SystemConfig, MIN_SHORT_ID_LEN};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use mc_core::{hash, MiniCommit, Store, StoreError};
use owo_colors::OwoColorize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

/// Find the top-level directory of the git working tree containing cwd
pub async fn find_repo_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    if !git::is_working_tree(&cwd).await {
        anyhow::bail!("not a git repository");
    }

    git::repository_root(&cwd)
        .await
        .context("Failed to locate repository root")
}

/// Find the repository and open its mini-commit store
pub async fn open_store() -> Result<(PathBuf, Store)> {
    let repo_root = find_repo_root().await?;
    let store = Store::open(&repo_root).context("Failed to initialize storage")?;
    Ok((repo_root, store))
}

/// Resolve a mini-commit reference
/// Supports:
/// - Full id: "835ad6be804e3907992a6ac1a7daf229cde13d2f"
/// - Id prefix: "835ad6be" (at least 4 characters, must be unique)
pub fn resolve_mini_commit_ref(reference: &str, store: &Store) -> Result<MiniCommit> {
    let reference = reference.trim().to_ascii_lowercase();

    if hash::is_valid_id(&reference) {
        return Ok(store.get(&reference)?);
    }

    if reference.len() >= MIN_SHORT_ID_LEN && hash::is_hex_prefix(&reference) {
        let mut matching = store.find_by_prefix(&reference)?;

        if matching.len() > 1 {
            anyhow::bail!(
                "Ambiguous mini-commit prefix '{}': matches {} mini-commits",
                reference,
                matching.len()
            );
        }

        if let Some(mc) = matching.pop() {
            return Ok(mc);
        }
    }

    Err(StoreError::NotFound(reference).into())
}

/// Abbreviate an id as configured
pub fn short_id<'a>(id: &'a str, config: &SystemConfig) -> &'a str {
    hash::short_id(id, config.display.short_id_len)
}

/// Colors are used only when enabled and stdout is a terminal
pub fn use_color(config: &SystemConfig) -> bool {
    config.display.color && std::io::stdout().is_terminal()
}

/// Highlight an id for display
pub fn paint_id(id: &str, color: bool) -> String {
    if color {
        id.yellow().to_string()
    } else {
        id.to_string()
    }
}

/// Format a creation time as configured, e.g. "2024-01-03 14:30:00 (2 hours ago)"
pub fn format_time(ts: &DateTime<Utc>, config: &SystemConfig) -> String {
    let absolute = format_absolute_time(ts, &config.display.time_format);
    if config.display.relative_times {
        format!("{} ({})", absolute, format_relative_time(ts))
    } else {
        absolute
    }
}

/// Format timestamp as local absolute time
pub fn format_absolute_time(ts: &DateTime<Utc>, format: &str) -> String {
    ts.with_timezone(&Local).format(format).to_string()
}

/// Format timestamp as relative time ("2 hours ago")
pub fn format_relative_time(ts: &DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(*ts);

    if elapsed.num_milliseconds() < 0 {
        return "in the future".to_string();
    }

    let seconds = elapsed.num_seconds();
    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{} days ago", seconds / 86400)
    } else {
        format!("{} weeks ago", seconds / 604800)
    }
}

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
