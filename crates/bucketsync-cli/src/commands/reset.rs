//! Reset command - clear entries from the state ledger
//!
//! Clearing FAILED entries gives spent objects a fresh retry budget on the
//! next run; `--all` forgets DONE entries too (the next run will re-probe
//! everything). The rewrite goes through the same atomic temp-and-rename
//! path as a sync run.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use bucketsync_engine::RunError;
use bucketsync_state::StateStore;

use crate::commands::load_config;
use crate::output::{get_formatter, OutputFormat};

/// Arguments for the reset subcommand
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Clear every entry, not just FAILED ones
    #[arg(long)]
    all: bool,

    /// Reset a specific state file instead of the configured one
    #[arg(long)]
    state_file: Option<std::path::PathBuf>,
}

impl ResetCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let formatter = get_formatter(format);
        let (config, _) = load_config(config_path)?;

        let state_path = self
            .state_file
            .clone()
            .unwrap_or_else(|| config.sync.state_file.clone());
        let state = StateStore::load(&state_path).await.map_err(RunError::State)?;

        let removed = if self.all {
            state.clear_all().await
        } else {
            state.clear_failed().await
        };
        state.save().await.map_err(RunError::State)?;

        let what = if self.all { "entries" } else { "failed entries" };
        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "state_file": state_path.display().to_string(),
                "removed": removed,
                "all": self.all,
                "remaining": state.len().await,
            }));
        } else {
            formatter.success(&format!(
                "Removed {} {} from {}",
                removed,
                what,
                state_path.display()
            ));
        }

        Ok(())
    }
}
