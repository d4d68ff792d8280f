//! Delete every mini-commit

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub async fn run(yes: bool) -> Result<()> {
    let (_repo_root, store) = util::open_store().await?;

    let count = store.list().context("Failed to load mini-commits")?.len();
    if count == 0 {
        println!("No mini-commits found");
        return Ok(());
    }

    if !yes {
        let prompt = format!("Delete all {} mini-commit(s)?", count);
        if !util::confirm(&prompt)? {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    let removed = store.clear().context("Failed to clear mini-commits")?;
    tracing::info!("Cleared {} mini-commits", removed);

    println!("Deleted {} mini-commit(s)", removed);
    Ok(())
}
