//! Configuration management command
//!
//! Provides CLI interface to view and edit user configuration.

use crate::system_config::{self, SystemConfig};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Keys accepted by `get` and `set`
pub const KEYS: &[&str] = &[
    "display.short_id_len",
    "display.time_format",
    "display.relative_times",
    "display.color",
];

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[display]".yellow());
    for key in KEYS {
        let name = key.trim_start_matches("display.");
        println!("  {} = {}", name.cyan(), value_of(&config, key)?);
    }

    println!("\n{}", "Valid Ranges:".bold());
    println!("  short_id_len: 4-40");
    println!("  time_format: chrono strftime, e.g. %Y-%m-%d %H:%M:%S");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;
    println!("{}", value_of(&config, key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;

    apply(&mut config, key, value)?;

    // Validate before saving
    config.validate().context("Invalid configuration value")?;

    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else {
        println!("{}", config_path.display());
        if !config_path.exists() {
            println!("{}", "File does not exist. Use --create to create it.".yellow());
        }
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", system_config::example_config());
    Ok(())
}

fn value_of(config: &SystemConfig, key: &str) -> Result<String> {
    let value = match key {
        "display.short_id_len" => config.display.short_id_len.to_string(),
        "display.time_format" => config.display.time_format.clone(),
        "display.relative_times" => config.display.relative_times.to_string(),
        "display.color" => config.display.color.to_string(),
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'git mini-commit config list' to see available keys.",
            key
        ),
    };
    Ok(value)
}

fn apply(config: &mut SystemConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "display.short_id_len" => {
            config.display.short_id_len = value
                .parse()
                .context("Invalid value: must be a positive integer")?;
        }
        "display.time_format" => {
            config.display.time_format = value.to_string();
        }
        "display.relative_times" => {
            config.display.relative_times = value
                .parse()
                .context("Invalid value: must be 'true' or 'false'")?;
        }
        "display.color" => {
            config.display.color = value
                .parse()
                .context("Invalid value: must be 'true' or 'false'")?;
        }
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'git mini-commit config list' to see available keys.",
            key
        ),
    }
    Ok(())
}
