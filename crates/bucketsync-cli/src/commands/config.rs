//! Config command - view and bootstrap bucketsync configuration
//!
//! Provides the `bucketsync config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Writes a commented starter configuration file
//! 3. Prints the effective configuration path

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use bucketsync_core::config::Config;

use crate::output::{get_formatter, OutputFormat};

/// Starter configuration written by `config init`.
const CONFIG_TEMPLATE: &str = "\
# bucketsync configuration
#
# Credentials are not stored here: the sync reads a pre-issued bearer token
# from the environment variable named under `auth.token_env`.

source:
  namespace: my-namespace
  bucket: my-source-bucket
  region: eu-frankfurt-1
  # Only sync objects under this name prefix.
  # prefix: \"2024/\"
  # Override the API endpoint (defaults to the region's standard endpoint).
  # endpoint: \"https://objectstorage.eu-frankfurt-1.oraclecloud.com\"

destination:
  namespace: my-namespace
  bucket: my-destination-bucket
  region: us-ashburn-1
  # Prepended to every destination object name.
  # prefix: \"backup/\"

sync:
  # Concurrent object workers.
  max_workers: 50
  # Copy attempts per run; a FAILED object is skipped once its recorded
  # retries reach this bound (clear with `bucketsync reset`).
  max_retries: 5
  # Ledger of per-object outcomes; keep it next to where you run the sync.
  state_file: sync_state.json

auth:
  token_env: BUCKETSYNC_TOKEN

logging:
  level: info
";

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Write a commented starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration file path
    Path,
}

impl ConfigCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(format, config_path),
            ConfigCommand::Init { force } => self.execute_init(format, config_path, *force),
            ConfigCommand::Path => self.execute_path(format, config_path),
        }
    }

    fn execute_show(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let formatter = get_formatter(format);
        let path = effective_path(config_path);
        let config = Config::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        if format.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", path.display()));
            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }
        Ok(())
    }

    fn execute_init(&self, format: OutputFormat, config_path: Option<&Path>, force: bool) -> Result<()> {
        let formatter = get_formatter(format);
        let path = effective_path(config_path);

        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create configuration directory")?;
        }
        std::fs::write(&path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "path": path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Wrote starter configuration to {}", path.display()));
            formatter.info("Edit the bucket names, then run: bucketsync sync");
        }
        Ok(())
    }

    fn execute_path(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let formatter = get_formatter(format);
        let path = effective_path(config_path);
        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
            }));
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}

fn effective_path(config_path: Option<&Path>) -> std::path::PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path)
}
