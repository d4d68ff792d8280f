//! Re-apply a mini-commit to the staging area

use crate::system_config;
use crate::util;
use anyhow::{Context, Result};

/// Apply the stored patch with `git apply --cached`; with `drop`, delete
/// the mini-commit once the patch applied
pub async fn run(reference: &str, drop: bool) -> Result<()> {
    let config = system_config::load()?;
    let (repo_root, store) = util::open_store().await?;

    let mc = util::resolve_mini_commit_ref(reference, &store)
        .context("Failed to get mini-commit")?;

    git::apply_to_staging(&repo_root, &mc.patch)
        .await
        .context("Failed to apply patch")?;

    tracing::info!("Applied mini-commit {}", mc.id);

    let color = util::use_color(&config);
    let short = util::paint_id(util::short_id(&mc.id, &config), color);

    println!("Applied mini-commit '{}' to staging area", short);
    println!("Message: {}", mc.message);

    if drop {
        store
            .delete(&mc.id)
            .context("Patch applied, but failed to delete mini-commit")?;
        println!("Deleted mini-commit '{}'", short);
    }

    Ok(())
}
