use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::args::{Cli, Commands, SnapshotArgs};
use tabhost::config::{load_config, HostConfig, Verbosity};
use tabhost::demo;
use tabhost::error::HostError;
use tabhost::host::{Event, KeyBindings, NavigationKeyPolicy};
use tabhost::tui::{self, RunOptions};

fn main() {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let interactive = matches!(cli.command, None | Some(Commands::Run));

    if let Err(err) = init_tracing(verbosity, cli.log_file.as_deref(), interactive) {
        display_error(&err);
        std::process::exit(1);
    }

    tracing::debug!("Verbosity level: {:?}", verbosity);

    if let Err(err) = run(cli) {
        display_error(&err);
        std::process::exit(1);
    }
}

/// Set up tracing with a verbosity-based filter. RUST_LOG overrides the CLI
/// flags.
///
/// The interactive host owns the terminal, so without `--log-file` its logs
/// are discarded rather than written over the screen.
fn init_tracing(verbosity: Verbosity, log_file: Option<&Path>, interactive: bool) -> Result<(), HostError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directives()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if interactive => builder.with_writer(io::sink).init(),
        // Keep stdout clean for output
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Execute the dispatched command.
fn run(cli: Cli) -> Result<(), HostError> {
    if let Some(Commands::Completions(args)) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "tabhost", &mut io::stdout());
        return Ok(());
    }

    let file = load_config(cli.config.as_deref())?;
    let config = HostConfig::resolve(file, cli.keys.to_keys_config(), cli.keys.tick_ms)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let mut compositor = demo::build(config.bindings)?;
            compositor.set_broadcast_ticks(config.broadcast_ticks);
            let options = RunOptions {
                tick_rate: config.tick_rate,
                ..RunOptions::default()
            };
            tracing::info!(pages = compositor.pages().len(), "Starting host");
            tui::launch(compositor, options, |handle| demo::spawn_clock(handle.clone()))?;
            Ok(())
        }
        Commands::Snapshot(args) => {
            println!("{}", snapshot(config, &args)?);
            Ok(())
        }
        Commands::Keys => {
            print!("{}", describe_bindings(&config.bindings));
            Ok(())
        }
        Commands::Completions(_) => Ok(()),
    }
}

/// Render the demo host once at the requested size.
fn snapshot(config: HostConfig, args: &SnapshotArgs) -> Result<String, HostError> {
    let mut compositor = demo::build(config.bindings)?;
    compositor.set_broadcast_ticks(config.broadcast_ticks);
    let startup = compositor.init();
    tui::settle(&mut compositor, startup);

    let cmd = compositor.update(Event::Resize(args.width, args.height));
    tui::settle(&mut compositor, cmd);

    if let Some(page) = &args.page {
        compositor.switch_to(page)?;
    }
    for _ in 0..args.steps {
        compositor.next_page();
    }
    Ok(compositor.view())
}

fn describe_bindings(keys: &KeyBindings) -> String {
    let quit = keys
        .quit()
        .map(|chord| chord.to_string())
        .unwrap_or_else(|| "none".to_string());
    let policy = match keys.policy() {
        NavigationKeyPolicy::Consume => "consumed",
        NavigationKeyPolicy::Forward => "forwarded to page",
    };
    format!(
        "next      {}\nprevious  {}\nquit      {}\nnav keys  {}\n",
        keys.next(),
        keys.previous(),
        quit,
        policy
    )
}

/// Display a HostError with optional suggestion hint to stderr.
fn display_error(err: &HostError) {
    eprintln!("error: {}", err);
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  hint: {}", suggestion);
    }
}
