//! Status command - offline inspection of the state ledger
//!
//! Reads the ledger without touching either bucket: DONE / FAILED totals,
//! how many failures have spent their retry bound, and optionally the
//! failed objects with their last errors.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Args;

use bucketsync_engine::RunError;
use bucketsync_state::StateStore;

use crate::commands::load_config;
use crate::output::{get_formatter, OutputFormat};

/// Arguments for the status subcommand
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Inspect a specific state file instead of the configured one
    #[arg(long)]
    state_file: Option<std::path::PathBuf>,

    /// List failed objects with their last error
    #[arg(long)]
    failed: bool,
}

impl StatusCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let formatter = get_formatter(format);
        let (config, _) = load_config(config_path)?;

        let state_path = self
            .state_file
            .clone()
            .unwrap_or_else(|| config.sync.state_file.clone());
        let state = StateStore::load(&state_path).await.map_err(RunError::State)?;

        let snapshot = state.snapshot().await;
        let counts = state.counts().await;
        let exhausted = snapshot
            .values()
            .filter(|r| !r.is_done() && r.is_exhausted(config.sync.max_retries))
            .count();

        let mut failed: Vec<_> = snapshot
            .iter()
            .filter(|(_, r)| !r.is_done())
            .map(|(name, r)| (name.as_str().to_string(), r.clone()))
            .collect();
        failed.sort_by(|a, b| a.0.cmp(&b.0));

        let modified = std::fs::metadata(&state_path)
            .and_then(|m| m.modified())
            .ok()
            .map(|t| DateTime::<Local>::from(t).to_rfc3339());

        if format.is_json() {
            let failed_json: Vec<serde_json::Value> = if self.failed {
                failed
                    .iter()
                    .map(|(name, r)| {
                        serde_json::json!({
                            "name": name,
                            "retries": r.retries,
                            "error": r.error,
                        })
                    })
                    .collect()
            } else {
                Vec::new()
            };
            formatter.print_json(&serde_json::json!({
                "state_file": state_path.display().to_string(),
                "last_modified": modified,
                "entries": snapshot.len(),
                "done": counts.done,
                "failed": counts.failed,
                "exhausted": exhausted,
                "failed_objects": failed_json,
            }));
            return Ok(());
        }

        formatter.success(&format!("State ledger: {}", state_path.display()));
        if let Some(modified) = modified {
            formatter.info(&format!("last modified: {}", modified));
        }
        formatter.info(&format!(
            "entries={} DONE={} FAILED={} (of which exhausted: {})",
            snapshot.len(),
            counts.done,
            counts.failed,
            exhausted
        ));

        if self.failed {
            if failed.is_empty() {
                formatter.info("no failed objects");
            }
            for (name, record) in failed {
                formatter.info(&format!(
                    "FAILED {} (retries={}): {}",
                    name,
                    record.retries,
                    record.error.as_deref().unwrap_or("unknown error")
                ));
            }
        }

        Ok(())
    }
}
