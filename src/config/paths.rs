//! Platform-specific config directory helpers.
//!
//! Uses the `dirs` crate to resolve platform-appropriate directories:
//! - Linux:   `~/.config/tabhost/`
//! - Windows: `%APPDATA%\tabhost\`
//! - macOS:   `~/Library/Application Support/tabhost/`

use std::path::PathBuf;

use crate::error::HostError;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Get the tabhost config directory. The directory is not created; tabhost
/// only ever reads from it.
pub fn tabhost_config_dir() -> Result<PathBuf, HostError> {
    let base = dirs::config_dir()
        .ok_or_else(|| HostError::Config("Could not determine config directory".into()))?;
    Ok(base.join("tabhost"))
}

/// Default location of `config.toml`.
pub fn default_config_path() -> Result<PathBuf, HostError> {
    Ok(tabhost_config_dir()?.join(CONFIG_FILE))
}
