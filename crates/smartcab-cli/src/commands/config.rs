//! Configuration management commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use smartcab_core::SmartcabConfig;

use crate::settings::{LoadedConfig, CONFIG_FILE_NAME};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Where to write the file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        path: PathBuf,
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(cmd: &ConfigCommands, loaded: &LoadedConfig) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(loaded),
        ConfigCommands::Init { path, force } => init(path, *force),
    }
}

fn show(loaded: &LoadedConfig) -> Result<()> {
    match &loaded.source {
        Some(path) => println!("# Config file: {}", path.display()),
        None => println!("# No configuration file found, using defaults"),
    }
    println!("{}", render(&loaded.config)?);
    Ok(())
}

fn render(config: &SmartcabConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render configuration")
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    let contents = render(&SmartcabConfig::default())?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
