//! bucketsync Engine - The sync pipeline
//!
//! Turns a pair of configured object stores plus a state ledger into a
//! resumable one-directional sync run:
//!
//! 1. [`enumerator::SourceEnumerator`] materializes the full source listing.
//! 2. [`synchronizer::ObjectSynchronizer`] runs the per-object state machine
//!    (skip / probe / copy-with-retry) and writes exactly one state record
//!    per object per run.
//! 3. [`coordinator::SyncCoordinator`] fans the listing out over a fixed
//!    worker pool, collects outcomes, and persists the ledger on every exit
//!    path.
//!
//! Only two failure classes abort a run; everything else becomes a recorded
//! per-object outcome.

pub mod coordinator;
pub mod enumerator;
pub mod retry;
pub mod synchronizer;

pub use coordinator::{SyncCoordinator, SyncSummary};
pub use enumerator::SourceEnumerator;
pub use retry::RetryPolicy;
pub use synchronizer::{IObjectSynchronizer, ObjectSynchronizer, Outcome};

use thiserror::Error;

/// Run-fatal errors.
///
/// A failed listing means the work set is unknown; a failed state load means
/// resuming would repeat or lose work. Both abort the run. Per-object remote
/// failures never appear here.
#[derive(Debug, Error)]
pub enum RunError {
    /// Source enumeration failed
    #[error("Failed to enumerate source objects")]
    List(#[source] anyhow::Error),

    /// The state ledger could not be read or written
    #[error("State ledger error")]
    State(#[from] bucketsync_state::StateStoreError),
}
