//! Delete a mini-commit

use crate::system_config;
use crate::util;
use anyhow::{Context, Result};

pub async fn run(reference: &str) -> Result<()> {
    let config = system_config::load()?;
    let (_repo_root, store) = util::open_store().await?;

    let mc = util::resolve_mini_commit_ref(reference, &store)
        .context("Failed to delete mini-commit")?;

    store
        .delete(&mc.id)
        .context("Failed to delete mini-commit")?;

    tracing::info!("Deleted mini-commit {}", mc.id);

    println!(
        "Deleted mini-commit '{}'",
        util::paint_id(util::short_id(&mc.id, &config), util::use_color(&config))
    );

    Ok(())
}
