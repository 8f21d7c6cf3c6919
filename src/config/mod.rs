mod init;
mod schema;

pub use init::{starter_config, write_starter_config};
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::scoring::{validate_overrides, Variant, VariantConfig};

/// Get the config directory path (~/.config/manager-scorecard/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("manager-scorecard"))
}

/// Get the default config file path (~/.config/manager-scorecard/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the directory holding `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to an empty config when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path()?, false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate ladder overrides. The same config serves every variant.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    match config.ladders {
        Some(ref ladders) => validate_overrides(ladders),
        None => Ok(()),
    }
}

/// Built-in variant with the configured ladder overrides applied.
pub fn effective_variant(config: &Config, variant: Variant) -> Result<VariantConfig, Vec<String>> {
    let base = VariantConfig::for_variant(variant);
    match config.ladders {
        Some(ref ladders) => base.with_overrides(ladders),
        None => Ok(base),
    }
}

/// Store location from config, or ~/.config/manager-scorecard/scorecards.json
pub fn store_path(config: &Config) -> Result<PathBuf> {
    match config.store_path {
        Some(ref p) => Ok(p.clone()),
        None => Ok(get_config_dir()?.join("scorecards.json")),
    }
}
