//! bucketsync CLI - One-directional bulk object-storage synchronizer
//!
//! Provides commands for:
//! - Running a resumable sync between two buckets
//! - Inspecting the local state ledger
//! - Clearing failed (or all) ledger entries
//! - Viewing and bootstrapping configuration

use std::path::{Path, PathBuf};

use anyhow::Result;
use bucketsync_core::config::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    completions::CompletionsCommand, config::ConfigCommand, reset::ResetCommand,
    status::StatusCommand, sync::SyncCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "bucketsync",
    version,
    about = "One-directional bulk object-storage synchronizer"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output (warnings and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synchronize the source bucket into the destination bucket
    Sync(SyncCommand),
    /// Show state-ledger counts from the last runs
    Status(StatusCommand),
    /// Clear failed (or all) entries from the state ledger
    Reset(ResetCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Log level when no `-v` flag is given: the config file's `logging.level`
/// when readable, `info` otherwise.
fn configured_level(config_path: Option<&Path>) -> String {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);
    Config::load(&path)
        .map(|c| c.logging.level)
        .unwrap_or_else(|_| "info".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.quiet {
        "warn".to_string()
    } else {
        match cli.verbose {
            0 => configured_level(cli.config.as_deref()),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Sync(cmd) => cmd.execute(format, config_path).await,
        Commands::Status(cmd) => cmd.execute(format, config_path).await,
        Commands::Reset(cmd) => cmd.execute(format, config_path).await,
        Commands::Config(cmd) => cmd.execute(format, config_path).await,
        Commands::Completions(cmd) => cmd.execute(format).await,
    }
}
