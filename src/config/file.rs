//! Loading `config.toml`.

use std::path::Path;

use crate::error::HostError;

use super::paths::default_config_path;
use super::types::FileConfig;

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is tried
/// and a missing file yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, HostError> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(HostError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            read_config(path)
        }
        None => match default_config_path() {
            Ok(path) if path.exists() => read_config(&path),
            _ => Ok(FileConfig::default()),
        },
    }
}

/// Parse a config file from disk.
pub fn read_config(path: &Path) -> Result<FileConfig, HostError> {
    let contents = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}
