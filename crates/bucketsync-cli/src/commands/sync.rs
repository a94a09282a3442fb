//! Sync command - run one resumable sync pass
//!
//! Wires the configured endpoints into the engine: enumerate the source,
//! fan the work set out over the worker pool, and report the run summary.
//! Ctrl-C cancels between objects; the ledger is persisted either way, so
//! the next invocation resumes where this one stopped.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use bucketsync_core::ports::IObjectStore;
use bucketsync_engine::{
    ObjectSynchronizer, RetryPolicy, RunError, SourceEnumerator, SyncCoordinator, SyncSummary,
};
use bucketsync_state::StateStore;
use bucketsync_store::client::{BearerTokenAuthorizer, ObjectStorageClient};
use bucketsync_store::HttpObjectStore;

use crate::commands::load_config;
use crate::output::{get_formatter, OutputFormat};

/// Arguments for the sync subcommand
#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Override the state-ledger path from the configuration
    #[arg(long)]
    state_file: Option<std::path::PathBuf>,

    /// Override the worker count from the configuration
    #[arg(long)]
    workers: Option<u32>,
}

impl SyncCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let formatter = get_formatter(format);
        let (config, _) = load_config(config_path)?;

        let source_ref = config
            .source
            .container_ref()
            .context("Invalid source container")?;
        let dest_ref = config
            .destination
            .container_ref()
            .context("Invalid destination container")?;

        let authorizer = Arc::new(
            BearerTokenAuthorizer::from_env(&config.auth.token_env)
                .context("Missing bearer token")?,
        );

        // One adapter per region endpoint. Copies are addressed to the
        // source side; probes go to the destination side.
        let source_store: Arc<dyn IObjectStore> = Arc::new(HttpObjectStore::new(
            ObjectStorageClient::new(config.source.effective_endpoint(), authorizer.clone())?,
        ));
        let dest_store: Arc<dyn IObjectStore> = Arc::new(HttpObjectStore::new(
            ObjectStorageClient::new(config.destination.effective_endpoint(), authorizer)?,
        ));

        let state_path = self
            .state_file
            .clone()
            .unwrap_or_else(|| config.sync.state_file.clone());
        let state = Arc::new(StateStore::load(state_path).await.map_err(RunError::State)?);

        let enumerator = SourceEnumerator::new(
            source_store.clone(),
            source_ref.clone(),
            config.source.prefix.clone(),
        );
        let objects = enumerator.list_all().await?;

        let synchronizer = Arc::new(ObjectSynchronizer::new(
            source_store,
            dest_store,
            source_ref,
            dest_ref,
            config.destination.prefix.clone(),
            RetryPolicy::new(config.sync.max_retries),
            state.clone(),
        ));

        let workers = self.workers.unwrap_or(config.sync.max_workers) as usize;
        let coordinator = SyncCoordinator::new(synchronizer, state.clone(), workers);

        let cancel = CancellationToken::new();
        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, finishing in-flight objects");
                signal_cancel.cancel();
            }
        });

        let summary = coordinator.run(objects, cancel).await;

        if format.is_json() {
            formatter.print_json(&summary_json(&summary, state.path()));
        } else {
            if summary.interrupted {
                formatter.warn(&format!(
                    "Interrupted after {} of {} objects; rerun to resume",
                    summary.processed(),
                    summary.total
                ));
            }
            formatter.success(&format!(
                "Sync complete in {:.1}s. DONE={}, FAILED={} (see {})",
                summary.elapsed.as_secs_f64(),
                summary.done_total,
                summary.failed_total,
                state.path().display()
            ));
            formatter.info(&format!(
                "copied={} dest-exists={} already-done={} exhausted={} probe-failed={} copy-failed={}",
                summary.copied,
                summary.skipped_exists,
                summary.skipped_done,
                summary.skipped_exhausted,
                summary.probe_failed,
                summary.failed
            ));
        }

        Ok(())
    }
}

fn summary_json(summary: &SyncSummary, state_path: &Path) -> serde_json::Value {
    serde_json::json!({
        "total": summary.total,
        "copied": summary.copied,
        "skipped_done": summary.skipped_done,
        "skipped_exhausted": summary.skipped_exhausted,
        "skipped_exists": summary.skipped_exists,
        "probe_failed": summary.probe_failed,
        "failed": summary.failed,
        "unhandled": summary.unhandled,
        "done_total": summary.done_total,
        "failed_total": summary.failed_total,
        "elapsed_secs": summary.elapsed.as_secs_f64(),
        "interrupted": summary.interrupted,
        "state_file": state_path.display().to_string(),
    })
}
