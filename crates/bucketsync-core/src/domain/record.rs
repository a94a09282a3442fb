//! Per-object sync records
//!
//! A [`SyncRecord`] is the persisted outcome for one object. The ledger
//! (`bucketsync-state`) maps object names to these records; the engine
//! consults them to decide whether an object still needs work.
//!
//! ## Permanence rules
//!
//! - `DONE` is permanent for the lifetime of the state file: the object is
//!   never re-probed or re-copied in later runs.
//! - `FAILED` with `retries >= max_retries` is exhausted: skipped until the
//!   operator resets the entry (`bucketsync reset`).
//! - There is no in-progress status on disk; in-flight work is visible only
//!   in memory during a run.

use serde::{Deserialize, Serialize};

/// Terminal status of an object as recorded in the state file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncStatus {
    /// The object has been copied (or verified present) at the destination
    #[serde(rename = "DONE")]
    Done,
    /// The object's last run ended in a probe or copy failure
    #[serde(rename = "FAILED")]
    Failed,
}

/// Persisted per-object state.
///
/// Serialized as `{"status": "DONE"|"FAILED", "retries": N, "error": "..."}`
/// with `error` omitted when absent. Unknown fields are ignored on load so
/// old binaries keep reading files written by newer ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRecord {
    /// Terminal status from the most recent run that touched this object
    pub status: SyncStatus,
    /// Failed runs consumed so far (probe failures and copy exhaustion share
    /// this counter)
    #[serde(default)]
    pub retries: u32,
    /// Last error description, present only when `status` is FAILED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncRecord {
    /// A DONE record
    #[must_use]
    pub fn done(retries: u32) -> Self {
        Self {
            status: SyncStatus::Done,
            retries,
            error: None,
        }
    }

    /// A FAILED record carrying the last error message
    #[must_use]
    pub fn failed(retries: u32, error: impl Into<String>) -> Self {
        Self {
            status: SyncStatus::Failed,
            retries,
            error: Some(error.into()),
        }
    }

    /// True when this object has permanently succeeded
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == SyncStatus::Done
    }

    /// True when this object has failed and used up its retry budget
    #[must_use]
    pub fn is_exhausted(&self, max_retries: u32) -> bool {
        self.status == SyncStatus::Failed && self.retries >= max_retries
    }
}
