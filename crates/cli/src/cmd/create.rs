//! Create a mini-commit from the staged changes

use crate::system_config;
use crate::util;
use anyhow::{Context, Result};
use chrono::Utc;

/// Snapshot the staging area under `message`
pub async fn run(message: Option<&str>) -> Result<()> {
    let message = match message {
        Some(m) if !m.is_empty() => m,
        _ => anyhow::bail!("message is required (-m option)"),
    };

    let config = system_config::load()?;
    let repo_root = util::find_repo_root().await?;

    let has_changes = git::has_staged_changes(&repo_root)
        .await
        .context("Failed to check staging status")?;
    if !has_changes {
        anyhow::bail!("no staged changes");
    }

    let patch = git::staged_changes(&repo_root)
        .await
        .context("Failed to get staged changes")?;

    let store = mc_core::Store::open(&repo_root).context("Failed to initialize storage")?;
    let mc = store
        .create(message, Utc::now(), &patch)
        .context("Failed to save mini-commit")?;

    tracing::info!("Created mini-commit {} ({} bytes)", mc.id, mc.patch.len());

    let color = util::use_color(&config);
    println!(
        "Created mini-commit: {}",
        util::paint_id(util::short_id(&mc.id, &config), color)
    );
    println!("Message: {}", mc.message);
    println!("Created at: {}", util::format_time(&mc.created_at, &config));

    Ok(())
}
