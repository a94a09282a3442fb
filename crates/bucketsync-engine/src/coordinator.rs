//! Run coordination and worker fan-out
//!
//! A fixed pool of `max_workers` long-lived tasks pulls object names from a
//! shared task channel and pushes each outcome onto a results channel. The
//! coordinator tallies outcomes in arrival order and persists the ledger on
//! every exit path, cancelled runs included.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bucketsync_core::domain::{ObjectName, RunId};
use bucketsync_state::StateStore;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

use crate::synchronizer::{IObjectSynchronizer, Outcome};

// ============================================================================
// SyncSummary
// ============================================================================

/// Tally of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Objects in the source listing
    pub total: usize,
    /// Copies issued and accepted this run
    pub copied: usize,
    /// Skipped: ledger already DONE
    pub skipped_done: usize,
    /// Skipped: ledger FAILED with the retry bound spent
    pub skipped_exhausted: usize,
    /// Skipped: destination already held the object
    pub skipped_exists: usize,
    /// Probe errors recorded as failures
    pub probe_failed: usize,
    /// Copy exhaustion recorded as failures
    pub failed: usize,
    /// Worker errors that bypassed outcome classification
    pub unhandled: usize,
    /// DONE records in the final ledger (all runs combined)
    pub done_total: usize,
    /// FAILED records in the final ledger (all runs combined)
    pub failed_total: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
    /// True when the run was cancelled before draining the work set
    pub interrupted: bool,
}

impl SyncSummary {
    /// Objects actually examined this run.
    pub fn processed(&self) -> usize {
        self.copied
            + self.skipped_done
            + self.skipped_exhausted
            + self.skipped_exists
            + self.probe_failed
            + self.failed
            + self.unhandled
    }
}

// ============================================================================
// SyncCoordinator
// ============================================================================

/// Fans a work set out over a fixed worker pool and owns run-level
/// persistence.
pub struct SyncCoordinator {
    synchronizer: Arc<dyn IObjectSynchronizer>,
    state: Arc<StateStore>,
    max_workers: usize,
}

impl SyncCoordinator {
    pub fn new(
        synchronizer: Arc<dyn IObjectSynchronizer>,
        state: Arc<StateStore>,
        max_workers: usize,
    ) -> Self {
        Self {
            synchronizer,
            state,
            max_workers: max_workers.max(1),
        }
    }

    /// Runs the pool over `objects` until the work set is drained or
    /// `cancel` fires. The ledger is persisted before returning on either
    /// path; a persist failure is logged but does not discard the summary.
    pub async fn run(&self, objects: Vec<ObjectName>, cancel: CancellationToken) -> SyncSummary {
        let run_id = RunId::new();
        let span = info_span!("sync_run", run_id = %run_id, total = objects.len());
        self.run_inner(objects, cancel).instrument(span).await
    }

    async fn run_inner(&self, objects: Vec<ObjectName>, cancel: CancellationToken) -> SyncSummary {
        let started = Instant::now();
        let total = objects.len();
        let mut summary = SyncSummary {
            total,
            ..SyncSummary::default()
        };

        if total > 0 {
            let workers = self.max_workers.min(total);
            info!(total, workers, "Starting sync run");

            let (task_tx, task_rx) = mpsc::channel::<ObjectName>(total);
            for name in objects {
                // Capacity equals the work set, so this never blocks.
                if task_tx.send(name).await.is_err() {
                    break;
                }
            }
            drop(task_tx);
            let task_rx = Arc::new(tokio::sync::Mutex::new(task_rx));

            let (result_tx, mut result_rx) =
                mpsc::channel::<(ObjectName, anyhow::Result<Outcome>)>(workers);

            let mut handles = Vec::with_capacity(workers);
            for _ in 0..workers {
                let task_rx = Arc::clone(&task_rx);
                let result_tx = result_tx.clone();
                let synchronizer = Arc::clone(&self.synchronizer);
                let cancel = cancel.clone();

                handles.push(tokio::spawn(async move {
                    loop {
                        if cancel.is_cancelled() {
                            break;
                        }
                        let name = { task_rx.lock().await.recv().await };
                        let Some(name) = name else { break };

                        let outcome = synchronizer.sync_object(&name).await;
                        if result_tx.send((name, outcome)).await.is_err() {
                            break;
                        }
                    }
                }));
            }
            drop(result_tx);

            while let Some((name, outcome)) = result_rx.recv().await {
                self.tally(&mut summary, &name, outcome);
            }

            for handle in handles {
                if let Err(err) = handle.await {
                    error!(error = %err, "Worker task panicked");
                }
            }
        }

        summary.interrupted = cancel.is_cancelled();
        if summary.interrupted {
            warn!(processed = summary.processed(), total, "Run interrupted");
        }

        // The ledger is what makes the next run resumable; losing it is loud
        // but the run's tally is still worth returning.
        if let Err(err) = self.state.save().await {
            error!(error = %err, path = %self.state.path().display(), "Failed to persist sync state");
        }

        let counts = self.state.counts().await;
        summary.done_total = counts.done;
        summary.failed_total = counts.failed;
        summary.elapsed = started.elapsed();
        summary
    }

    fn tally(&self, summary: &mut SyncSummary, name: &ObjectName, outcome: anyhow::Result<Outcome>) {
        match outcome {
            Ok(Outcome::Copied { attempt }) => {
                summary.copied += 1;
                info!(object = %name, attempt, "COPIED");
            }
            Ok(Outcome::SkippedDone) => {
                summary.skipped_done += 1;
                info!(object = %name, "SKIP (already done)");
            }
            Ok(Outcome::SkippedExhausted) => {
                summary.skipped_exhausted += 1;
                info!(object = %name, "SKIP (retry bound spent)");
            }
            Ok(Outcome::SkippedExists) => {
                summary.skipped_exists += 1;
                info!(object = %name, "SKIP (destination exists)");
            }
            Ok(Outcome::ProbeFailed { error }) => {
                summary.probe_failed += 1;
                warn!(object = %name, error, "FAILED (probe)");
            }
            Ok(Outcome::Failed { error }) => {
                summary.failed += 1;
                warn!(object = %name, error, "FAILED (copy)");
            }
            Err(err) => {
                // Backstop: nothing was recorded for this object.
                summary.unhandled += 1;
                error!(object = %name, error = %err, "Unhandled worker error");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
