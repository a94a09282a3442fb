//! Per-object sync state machine
//!
//! One object, one run, one state-record write. The sequence:
//!
//! 1. Skip check against the ledger (already DONE, or FAILED with the retry
//!    bound spent).
//! 2. Destination probe. A present object is recorded DONE without copying.
//!    A probe *error* is a recorded failure, never treated as "absent".
//! 3. Bounded copy attempts with linear backoff.
//!
//! Every remote failure ends up classified in an [`Outcome`]; the `Err`
//! variant of `sync_object` is reserved for genuinely unhandled conditions,
//! which the coordinator logs as a backstop without touching the ledger.

use std::sync::Arc;

use anyhow::Result;
use bucketsync_core::domain::{ContainerRef, ObjectName, SyncRecord};
use bucketsync_core::ports::IObjectStore;
use bucketsync_state::StateStore;
use tracing::debug;

use crate::retry::RetryPolicy;

// ============================================================================
// Outcome
// ============================================================================

/// What happened to one object during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Copy accepted; `attempt` is the 0-based index of the successful try
    Copied { attempt: u32 },
    /// Ledger already marks the object DONE
    SkippedDone,
    /// Ledger marks the object FAILED with the retry bound spent
    SkippedExhausted,
    /// Destination already holds the object; recorded DONE without copying
    SkippedExists,
    /// The existence probe itself failed; recorded FAILED
    ProbeFailed { error: String },
    /// Every copy attempt failed; recorded FAILED
    Failed { error: String },
}

impl Outcome {
    /// True for the two outcomes that record FAILED.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::ProbeFailed { .. } | Outcome::Failed { .. })
    }
}

// ============================================================================
// IObjectSynchronizer trait
// ============================================================================

/// Seam between the coordinator's fan-out and the per-object logic, so the
/// pool can be tested with scripted synchronizers.
#[async_trait::async_trait]
pub trait IObjectSynchronizer: Send + Sync {
    /// Runs the state machine for one object.
    async fn sync_object(&self, name: &ObjectName) -> Result<Outcome>;
}

// ============================================================================
// ObjectSynchronizer
// ============================================================================

/// Production synchronizer: two store adapters, the shared ledger, and a
/// retry policy.
pub struct ObjectSynchronizer {
    /// Adapter bound to the source region; copy requests go here
    source_store: Arc<dyn IObjectStore>,
    /// Adapter bound to the destination region; probes go here
    dest_store: Arc<dyn IObjectStore>,
    source: ContainerRef,
    dest: ContainerRef,
    /// Prepended to the source name to form the destination name
    dest_prefix: Option<String>,
    policy: RetryPolicy,
    state: Arc<StateStore>,
}

impl ObjectSynchronizer {
    pub fn new(
        source_store: Arc<dyn IObjectStore>,
        dest_store: Arc<dyn IObjectStore>,
        source: ContainerRef,
        dest: ContainerRef,
        dest_prefix: Option<String>,
        policy: RetryPolicy,
        state: Arc<StateStore>,
    ) -> Self {
        Self {
            source_store,
            dest_store,
            source,
            dest,
            dest_prefix,
            policy,
            state,
        }
    }

    /// Destination name for a source object: optional prefix + source name.
    fn dest_name(&self, name: &ObjectName) -> Result<ObjectName> {
        match &self.dest_prefix {
            Some(prefix) => Ok(ObjectName::new(format!("{}{}", prefix, name.as_str()))?),
            None => Ok(name.clone()),
        }
    }
}

#[async_trait::async_trait]
impl IObjectSynchronizer for ObjectSynchronizer {
    async fn sync_object(&self, name: &ObjectName) -> Result<Outcome> {
        let prior = self.state.get(name).await;
        if let Some(record) = &prior {
            if record.is_done() {
                debug!(object = %name, "Already DONE, skipping");
                return Ok(Outcome::SkippedDone);
            }
            if record.is_exhausted(self.policy.max_attempts()) {
                debug!(object = %name, retries = record.retries, "Retry bound spent, skipping");
                return Ok(Outcome::SkippedExhausted);
            }
        }
        let prior_retries = prior.map(|r| r.retries).unwrap_or(0);
        let dest_name = self.dest_name(name)?;

        // Probe failures share the retries counter with copy failures: both
        // count as one failed run for this object.
        match self.dest_store.exists(&self.dest, &dest_name).await {
            Ok(true) => {
                self.state.set(name.clone(), SyncRecord::done(0)).await;
                return Ok(Outcome::SkippedExists);
            }
            Ok(false) => {}
            Err(err) => {
                let error = format!("{:#}", err);
                self.state
                    .set(
                        name.clone(),
                        SyncRecord::failed(prior_retries + 1, error.clone()),
                    )
                    .await;
                return Ok(Outcome::ProbeFailed { error });
            }
        }

        let copy = self
            .policy
            .run("copy_object", || {
                self.source_store
                    .copy_object(&self.source, &self.dest, name, &dest_name)
            })
            .await;

        match copy {
            Ok(((), attempt)) => {
                self.state.set(name.clone(), SyncRecord::done(attempt)).await;
                Ok(Outcome::Copied { attempt })
            }
            Err(err) => {
                let error = format!("{:#}", err);
                self.state
                    .set(
                        name.clone(),
                        SyncRecord::failed(prior_retries + 1, error.clone()),
                    )
                    .await;
                Ok(Outcome::Failed { error })
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
