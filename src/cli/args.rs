use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tabhost::config::KeysConfig;

#[derive(Parser, Debug)]
#[command(name = "tabhost", version, about = "Multi-tab terminal application host")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity (-v for verbose, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode: suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to config.toml (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub keys: KeyArgs,
}

/// Key binding overrides. These win over config.toml.
#[derive(clap::Args, Debug, Default)]
pub struct KeyArgs {
    /// Chord that switches to the next tab (e.g. "ctrl+right", "tab")
    #[arg(long, global = true)]
    pub next_key: Option<String>,

    /// Chord that switches to the previous tab (e.g. "ctrl+left", "backtab")
    #[arg(long, global = true)]
    pub prev_key: Option<String>,

    /// Chord that quits, or "none" to disable
    #[arg(long, global = true)]
    pub quit_key: Option<String>,

    /// Also deliver tab-switch keys to the newly active page
    #[arg(long, global = true)]
    pub forward_nav_keys: bool,

    /// Tick interval in milliseconds
    #[arg(long, global = true)]
    pub tick_ms: Option<u64>,
}

impl KeyArgs {
    pub fn to_keys_config(&self) -> KeysConfig {
        KeysConfig {
            next: self.next_key.clone(),
            previous: self.prev_key.clone(),
            quit: self.quit_key.clone(),
            forward_to_page: self.forward_nav_keys.then_some(true),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive demo host (default)
    Run,

    /// Render one frame of the demo host to stdout and exit
    Snapshot(SnapshotArgs),

    /// Print the effective key bindings
    Keys,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `tabhost snapshot` command.
#[derive(clap::Args, Debug)]
pub struct SnapshotArgs {
    /// Terminal width in columns
    #[arg(long, default_value = "80")]
    pub width: u16,

    /// Terminal height in rows
    #[arg(long, default_value = "24")]
    pub height: u16,

    /// Page to make active before rendering
    #[arg(long)]
    pub page: Option<String>,

    /// Number of next-tab steps to take before rendering
    #[arg(long, default_value = "0")]
    pub steps: usize,
}

/// Arguments for the `tabhost completions` command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
