use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Get the XDG config directory for devlink
///
/// Returns `$XDG_CONFIG_HOME/devlink` or `~/.config/devlink` if not set
pub fn config_dir() -> Result<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME").filter(|value| !value.is_empty()) {
        Some(value) => PathBuf::from(value),
        None => home_dir()?.join(".config"),
    };

    Ok(base.join("devlink"))
}

/// Path of the devlink config file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the home directory
pub fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .context("Failed to get home directory")
        .map(|bd| bd.home_dir().to_path_buf())
}
