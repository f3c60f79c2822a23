use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Page already registered: '{id}'")]
    DuplicateId { id: String },

    #[error("Page not found: '{id}'")]
    NotFound { id: String },

    #[error("Invalid key binding '{binding}'")]
    InvalidKeyBinding { binding: String },

    #[error("Config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HostError {
    /// Returns a user-friendly suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            HostError::DuplicateId { .. } => {
                Some("Page ids must be unique. Remove the existing page first or pick another id.")
            }
            HostError::NotFound { .. } => {
                Some("Check the page id. Ids are case-sensitive and must have been added first.")
            }
            HostError::InvalidKeyBinding { .. } => {
                Some("Use chords like 'ctrl+right', 'alt+shift+t', 'tab' or 'f2'.")
            }
            HostError::ConfigNotFound { .. } => {
                Some("Check the --config path, or omit it to use the default config location.")
            }
            HostError::Config(_) => Some("Check config.toml syntax and key names."),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for HostError {
    fn from(err: toml::de::Error) -> Self {
        HostError::Config(format!("Invalid config.toml: {}", err))
    }
}
