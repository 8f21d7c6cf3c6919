use anyhow::{Context, Result};
use std::path::Path;

use super::{ensure_parent_dir, Config};
use crate::scoring::{Variant, VariantConfig};

/// Starter config for `variant`, with every built-in ladder spelled out so
/// it can be tuned in place.
pub fn starter_config(variant: Variant) -> Config {
    Config {
        variant: Some(variant),
        store_path: None,
        ladders: Some(VariantConfig::for_variant(variant).to_overrides()),
    }
}

/// Write a starter config to `path`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_starter_config(path: &Path, variant: Variant, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite.",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&starter_config(variant))
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    ensure_parent_dir(path)?;
    std::fs::write(path, &yaml)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}
