//! `agglomerate config`: Configuration management commands.

use agglomerate_config::{AgglomerateConfig, DEFAULT_CONFIG_FILE};
use agglomerate_core::{Error, Result};
use std::path::Path;

pub fn show(config_path: Option<&Path>) -> Result<()> {
    let config = AgglomerateConfig::load(config_path)?;
    let toml_str = toml::to_string_pretty(&config).map_err(|e| Error::Config {
        message: format!("Failed to render config: {e}"),
    })?;
    print!("{toml_str}");
    Ok(())
}

pub fn init(config_path: Option<&Path>) -> Result<()> {
    let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    if path.exists() {
        println!("Config already exists at: {}", path.display());
        return Ok(());
    }

    std::fs::write(path, AgglomerateConfig::default_toml()).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    println!("Created {}", path.display());
    Ok(())
}
