//! smartcab CLI - train the Q-learning cab in the simulated grid world

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod settings;

use commands::{config, run};

#[derive(Parser)]
#[command(name = "smartcab")]
#[command(author, version, about = "smartcab - Q-learning driving agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: SMARTCAB_CONFIG, ./smartcab.toml, ~/.config/smartcab/smartcab.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent for a number of trials
    Run(run::RunArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn init_logging(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("smartcab={level}").into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = settings::load(cli.config.as_deref())?;

    // Initialize logging based on verbosity
    let log_level = if cli.verbose {
        "debug"
    } else {
        loaded.config.logging.level.as_str()
    };
    init_logging(log_level, cli.json_logs || loaded.config.logging.json);

    match &loaded.source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Run(args) => run::run(&args, loaded.config),
        Commands::Config(cmd) => config::run(&cmd, &loaded),
    }
}
