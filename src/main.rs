use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod dao;
mod error;
mod tui;
mod view;

use cli::args::{Cli, Commands};
use cli::output::ConsoleFeedback;
use config::load::{default_config_path, load_config};
use config::paths::data_dir;
use config::types::{BrowseConfig, Verbosity};
use dao::store::{FileStore, StoreFactory, STORE_FILE};
use dao::Gvr;
use error::BrowseError;
use view::pause::PauseAction;

const LOG_FILE: &str = "kbrowse.log";

fn main() {
    let cli = Cli::parse();

    // Convert CLI flags to verbosity level
    let verbosity = Verbosity::from((cli.quiet, cli.verbose));

    if let Err(err) = init_tracing(verbosity, cli.log_stderr) {
        display_error(&err);
        std::process::exit(1);
    }

    tracing::debug!("Verbosity level: {:?}", verbosity);

    if let Err(err) = run(cli) {
        tracing::error!(error = %err, "Command failed");
        display_error(&err);
        std::process::exit(1);
    }
}

/// Set up tracing with a verbosity-based filter; RUST_LOG overrides it.
///
/// The TUI owns the terminal, so logs go to a file in the data dir
/// unless `--log-stderr` is given.
fn init_tracing(verbosity: Verbosity, log_stderr: bool) -> Result<(), BrowseError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.as_tracing_filter()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if log_stderr {
        builder.with_writer(std::io::stderr).init();
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir()?.join(LOG_FILE))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

/// Merge the config file with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<BrowseConfig, BrowseError> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let mut config = load_config(&path)?;
    if cli.read_only {
        config.read_only = true;
    }
    if let Some(secs) = cli.call_timeout {
        config.call_timeout_secs = secs;
    }
    tracing::debug!(config = ?config, path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Execute the dispatched command.
fn run(cli: Cli) -> Result<(), BrowseError> {
    let config = resolve_config(&cli)?;
    let gvr: Gvr = cli.kind.parse()?;

    let store = match &cli.store {
        Some(path) => path.clone(),
        None => data_dir()?.join(STORE_FILE),
    };
    FileStore::seed_demo(&store)?;
    let factory = Arc::new(StoreFactory::new(store));
    let namespace = cli.namespace.clone();

    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => tui::launch_tui(gvr, config, factory, namespace),
        Commands::List => cli::list(
            &mut std::io::stdout(),
            &gvr,
            &config,
            factory.as_ref(),
            namespace.as_deref(),
        ),
        Commands::Pause { paths } => batch(PauseAction::Pause, &paths, &gvr, &config, &factory),
        Commands::Resume { paths } => batch(PauseAction::Resume, &paths, &gvr, &config, &factory),
    }
}

fn batch(
    action: PauseAction,
    paths: &[String],
    gvr: &Gvr,
    config: &BrowseConfig,
    factory: &StoreFactory,
) -> Result<(), BrowseError> {
    let mut sink = ConsoleFeedback::stdio();
    let res = cli::run_batch(action, paths, gvr, config, factory, &mut sink);
    tracing::debug!(errors = sink.errors(), "Batch finished");
    res
}

/// Display a BrowseError with optional suggestion hint to stderr.
fn display_error(err: &BrowseError) {
    eprintln!("error: {}", err);
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  hint: {}", suggestion);
    }
}
