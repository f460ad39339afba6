//! Globscope - interactive glob-scoped search
//!
//! Main entry point for the terminal application.
//!
//! # Execution Flow
//!
//! 1. Parse command line options
//! 2. Load YAML configuration from the config directory
//!    - `Globscope Groups.yaml` → glob groups (built-in defaults when missing)
//!    - `Globscope Settings.yaml` → search settings and ignore lists (+ `GLOBSCOPE_*` env)
//! 3. Initialize logging → <log_dir>/globscope.<date>
//! 4. Create the tokio runtime that runs the search subprocess
//! 5. Resolve the project root (flag or nearest marker above the working directory)
//! 6. Run one menu session on stdin/stdout
//! 7. Log metrics and shut the runtime down

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use globscope::metrics::Metrics;
use globscope::services::{RipgrepExecutor, detect_project_root};
use globscope::ui::{MenuController, SessionOutcome};
use globscope::{APP_NAME, ConfigManager, DefaultIgnores, SearchMode, VERSION};
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "globscope", version, about = "Classify glob groups, then search with ripgrep")]
struct Cli {
    /// Directory holding the YAML configuration files
    #[arg(long, default_value = "Globscope Data")]
    config_dir: Utf8PathBuf,

    /// Search root (defaults to the nearest project root above the working directory)
    #[arg(long)]
    root: Option<Utf8PathBuf>,

    /// Debug logging, also echoed to stderr
    #[arg(long)]
    debug: bool,

    /// Start in regex mode regardless of the configured default
    #[arg(long)]
    regex: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let user_config = config_manager.load_user_config()?;
    let settings = &user_config.search_settings;
    let debug_mode = cli.debug || settings.debug_mode;

    let _log_guard = globscope::logging::setup_logging_with_console(
        &settings.log_dir,
        "globscope",
        debug_mode,
        debug_mode,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // The search subprocess runs here; the menu stays on the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("globscope-worker")
        .build()?;

    let groups_config = config_manager.load_groups_config()?;
    let registry = Arc::new(groups_config.to_registry()?);

    let root = match cli.root {
        Some(root) => root,
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            let cwd = Utf8PathBuf::try_from(cwd).context("Working directory is not UTF-8")?;
            detect_project_root(&cwd)
        }
    };

    let mode = if cli.regex {
        SearchMode::Regex
    } else {
        SearchMode::from_literal(settings.literal_by_default)
    };

    let metrics = Arc::new(Metrics::new());
    let executor = RipgrepExecutor::from_settings(settings, runtime.handle().clone());
    let controller = MenuController::new(
        registry,
        executor,
        DefaultIgnores::from(&user_config.ignore),
        &root,
        mode,
        Arc::clone(&metrics),
    );

    let outcome = controller.run(io::stdin().lock(), io::stdout().lock());

    match &outcome {
        Ok(SessionOutcome::Searched { outcome, .. }) => {
            tracing::info!("Session finished: {}", outcome.summary())
        }
        Ok(SessionOutcome::Abandoned) => tracing::info!("Session finished without a search"),
        Err(e) => tracing::error!("Session error: {:#}", e),
    }

    metrics.log_summary();
    runtime.shutdown_timeout(Duration::from_secs(5));
    tracing::info!("Shutdown complete");

    outcome.map(|_| ())
}
