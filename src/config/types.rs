use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::{KeyBindings, KeyChord, NavigationKeyPolicy};

/// How much the host logs, from `-q` / `-v` / `-vv`.
///
/// Directives are scoped so that `-v` turns up this crate's events without
/// also flooding the log with dependency internals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    /// `quiet` wins over any number of `-v`.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, _) => Verbosity::Trace,
        }
    }

    /// `EnvFilter` directives for this level.
    pub fn filter_directives(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn,tabhost=info",
            Verbosity::Verbose => "info,tabhost=debug",
            Verbosity::Trace => "debug,tabhost=trace",
        }
    }
}

/// Value that disables the quit binding.
pub const UNBOUND: &str = "none";

/// `[keys]` table of `config.toml`. Also built from CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Chord, or `"none"` to disable.
    pub quit: Option<String>,
    /// Also deliver navigation keys to the newly active page.
    pub forward_to_page: Option<bool>,
}

impl KeysConfig {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: KeysConfig) -> KeysConfig {
        KeysConfig {
            next: overrides.next.or(self.next),
            previous: overrides.previous.or(self.previous),
            quit: overrides.quit.or(self.quit),
            forward_to_page: overrides.forward_to_page.or(self.forward_to_page),
        }
    }

    /// Build the binding table, starting from the defaults.
    pub fn to_bindings(&self) -> Result<KeyBindings, HostError> {
        let mut keys = KeyBindings::default();
        if let Some(next) = &self.next {
            keys.set_next(next.parse::<KeyChord>()?);
        }
        if let Some(previous) = &self.previous {
            keys.set_previous(previous.parse::<KeyChord>()?);
        }
        if let Some(quit) = &self.quit {
            if quit.trim().eq_ignore_ascii_case(UNBOUND) {
                keys.set_quit(None);
            } else {
                keys.set_quit(Some(quit.parse::<KeyChord>()?));
            }
        }
        if self.forward_to_page == Some(true) {
            keys.set_policy(NavigationKeyPolicy::Forward);
        }
        Ok(keys)
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub keys: KeysConfig,
    /// Tick interval in milliseconds.
    pub tick_ms: Option<u64>,
    /// Deliver ticks to every page instead of only the active one.
    pub broadcast_ticks: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub bindings: KeyBindings,
    pub tick_rate: Duration,
    pub broadcast_ticks: bool,
}

impl HostConfig {
    pub const DEFAULT_TICK_MS: u64 = 250;

    /// Resolve file settings with CLI overrides applied on top.
    pub fn resolve(
        file: FileConfig,
        cli_keys: KeysConfig,
        cli_tick_ms: Option<u64>,
    ) -> Result<Self, HostError> {
        let keys = file.keys.merge(cli_keys);
        let tick_ms = cli_tick_ms.or(file.tick_ms).unwrap_or(Self::DEFAULT_TICK_MS);
        if tick_ms == 0 {
            return Err(HostError::Config("tick_ms must be greater than zero".into()));
        }
        Ok(Self {
            bindings: keys.to_bindings()?,
            tick_rate: Duration::from_millis(tick_ms),
            broadcast_ticks: file.broadcast_ticks.unwrap_or(false),
        })
    }
}
