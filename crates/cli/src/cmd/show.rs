//! Show a mini-commit and its patch

use crate::patch_utils::{self, PatchStats};
use crate::system_config;
use crate::util;
use anyhow::{Context, Result};
use std::io::Write;

/// Print the header, then the patch (or only its statistics with `stat`)
pub async fn run(reference: &str, stat: bool) -> Result<()> {
    let config = system_config::load()?;
    let (_repo_root, store) = util::open_store().await?;

    let mc = util::resolve_mini_commit_ref(reference, &store)
        .context("Failed to get mini-commit")?;

    let color = util::use_color(&config);

    println!(
        "Mini-commit: {}",
        util::paint_id(util::short_id(&mc.id, &config), color)
    );
    println!("Message: {}", mc.message);
    println!("Created: {}", util::format_time(&mc.created_at, &config));

    if stat {
        println!("\nStat ({}):", util::format_size(mc.patch.len() as u64));
        print!("{}", PatchStats::parse(&mc.patch).render(color));
        return Ok(());
    }

    println!("\nDiff:");
    println!("---");

    let body = if color {
        patch_utils::colorize_patch(&mc.patch)
    } else {
        mc.patch
    };

    // Uncolored output keeps the patch bytes unchanged
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(body.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
