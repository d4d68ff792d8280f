//! List mini-commits in creation order

use crate::system_config;
use crate::util;
use anyhow::{Context, Result};

pub async fn run() -> Result<()> {
    let config = system_config::load()?;
    let (_repo_root, store) = util::open_store().await?;

    let mini_commits = store.list().context("Failed to load mini-commits")?;

    if mini_commits.is_empty() {
        println!("No mini-commits found");
        return Ok(());
    }

    let color = util::use_color(&config);

    println!("Mini-commits ({}):\n", mini_commits.len());
    for (i, mc) in mini_commits.iter().enumerate() {
        println!(
            "{}. ID: {}",
            i + 1,
            util::paint_id(util::short_id(&mc.id, &config), color)
        );
        println!("   Message: {}", mc.message);
        println!("   Created: {}", util::format_time(&mc.created_at, &config));
        println!();
    }

    Ok(())
}
