use crate::config::{CodesenseConfig, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write a `.codesense.toml` holding every default into `dir`.
pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = toml::to_string_pretty(&CodesenseConfig::default())
        .context("Failed to render default configuration")?;
    let contents = format!("# codesense configuration\n\n{body}");
    fs::write(&config_path, contents)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    log::info!("Created {}", config_path.display());
    Ok(())
}
