//! User configuration (`config.toml`)
//!
//! Lives at `<config dir>/git-mini-commit/config.toml`; `MINI_COMMIT_CONFIG`
//! points somewhere else. A missing file means all defaults.

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "MINI_COMMIT_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub display: DisplayConfig,
}

/// How mini-commits are printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Characters of the id shown in listings
    pub short_id_len: usize,
    /// strftime format for creation times (local time zone)
    pub time_format: String,
    /// Append "N minutes ago" to creation times
    pub relative_times: bool,
    /// Colorize patches when stdout is a terminal
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            short_id_len: mc_core::SHORT_ID_LEN,
            time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            relative_times: false,
            color: true,
        }
    }
}

/// Invalid configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("display.short_id_len must be between 4 and 40 (got {0})")]
    ShortIdLen(usize),

    #[error("display.time_format is not a valid strftime format: '{0}'")]
    TimeFormat(String),
}

/// Shortest id prefix accepted and displayed
pub const MIN_SHORT_ID_LEN: usize = 4;

impl SystemConfig {
    /// Check value ranges
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let len = self.display.short_id_len;
        if !(MIN_SHORT_ID_LEN..=mc_core::hash::ID_HEX_LEN).contains(&len) {
            return Err(ConfigError::ShortIdLen(len));
        }

        let format = &self.display.time_format;
        if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::TimeFormat(format.clone()));
        }

        Ok(())
    }
}

/// Location of the config file
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("git-mini-commit").join("config.toml"))
}

/// Load the config, falling back to defaults when no file exists
pub fn load() -> Result<SystemConfig> {
    let path = match config_file_path() {
        Some(path) if path.exists() => path,
        _ => return Ok(SystemConfig::default()),
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Write the config, creating parent directories
pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// Create the config file with defaults if it does not exist yet
pub fn init_if_missing() -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save(&SystemConfig::default())?;
    }
    Ok(path)
}

/// Annotated example configuration
pub fn example_config() -> &'static str {
    r#"# git-mini-commit configuration

[display]
# Characters of the id shown by `list`, `show`, ... (4-40)
short_id_len = 8

# strftime format for creation times, in the local time zone
time_format = "%Y-%m-%d %H:%M:%S"

# Also show "3 minutes ago"
relative_times = false

# Colorize patches printed by `show` when stdout is a terminal
color = true
"#
}
