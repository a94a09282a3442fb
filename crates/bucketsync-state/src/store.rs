//! The state ledger
//!
//! [`StateStore`] owns the whole `ObjectName -> SyncRecord` map behind a
//! single `tokio::sync::Mutex`. There is no per-key locking: the critical
//! section is an O(1) map access, workers spend their time blocked on
//! network I/O rather than on this lock, and one lock domain makes the
//! consistency model trivial.
//!
//! ## Design Decisions
//!
//! - **Atomic saves**: the full map is serialized to `<path>.tmp` in the
//!   same directory and renamed over the final path, so a crash mid-write
//!   never corrupts the previous good file.
//! - **Missing file is not an error**: a first run starts from an empty map.
//!   A file that exists but does not parse *is* an error; the operator must
//!   intervene rather than have their progress silently discarded.
//! - **Remote calls never happen under the lock**: callers take `get`/`set`
//!   round trips, not a guard.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use bucketsync_core::domain::{ObjectName, SyncRecord, SyncStatus};

// ============================================================================
// StateStoreError
// ============================================================================

/// Errors raised by the state ledger
#[derive(Debug, Error)]
pub enum StateStoreError {
    /// The state file exists but could not be read
    #[error("Failed to read state file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but is not a valid serialized ledger
    #[error("State file {path} is corrupt: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The ledger could not be durably written
    #[error("Failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// StateStore
// ============================================================================

/// DONE/FAILED totals derived from the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    /// Objects recorded DONE
    pub done: usize,
    /// Objects recorded FAILED (exhausted or not)
    pub failed: usize,
}

/// Durable key/value ledger of per-object sync status
#[derive(Debug)]
pub struct StateStore {
    /// Final on-disk path of the ledger
    path: PathBuf,
    /// The whole map, one lock domain
    state: Mutex<HashMap<ObjectName, SyncRecord>>,
}

impl StateStore {
    /// Loads the ledger from `path`.
    ///
    /// Returns an empty ledger when the file does not exist. Fails with
    /// [`StateStoreError::Parse`] when the file exists but is not a valid
    /// serialized map: a read failure at startup is fatal to the run.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StateStoreError> {
        let path = path.into();

        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let map: HashMap<ObjectName, SyncRecord> = serde_json::from_slice(&bytes)
                    .map_err(|source| StateStoreError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                debug!(path = %path.display(), entries = map.len(), "Loaded state file");
                map
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No state file yet, starting empty");
                HashMap::new()
            }
            Err(source) => return Err(StateStoreError::Read { path, source }),
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// On-disk path of the ledger
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up the record for `name`, if any.
    pub async fn get(&self, name: &ObjectName) -> Option<SyncRecord> {
        self.state.lock().await.get(name).cloned()
    }

    /// Records the terminal outcome for `name`, replacing any prior record.
    ///
    /// The lock-protected insert is the unit of visibility: a record is
    /// either fully present or untouched, never torn.
    pub async fn set(&self, name: ObjectName, record: SyncRecord) {
        self.state.lock().await.insert(name, record);
    }

    /// Number of recorded objects
    pub async fn len(&self) -> usize {
        self.state.lock().await.len()
    }

    /// True when nothing has been recorded yet
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.is_empty()
    }

    /// A point-in-time copy of the whole map, for summaries and reporting.
    pub async fn snapshot(&self) -> HashMap<ObjectName, SyncRecord> {
        self.state.lock().await.clone()
    }

    /// DONE/FAILED totals over the current map.
    pub async fn counts(&self) -> StateCounts {
        let state = self.state.lock().await;
        let mut counts = StateCounts::default();
        for record in state.values() {
            match record.status {
                SyncStatus::Done => counts.done += 1,
                SyncStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }

    /// Removes all FAILED records so their objects are retried on the next
    /// run. Returns how many entries were cleared.
    pub async fn clear_failed(&self) -> usize {
        let mut state = self.state.lock().await;
        let before = state.len();
        state.retain(|_, record| record.status != SyncStatus::Failed);
        before - state.len()
    }

    /// Removes every record. Returns how many entries were cleared.
    pub async fn clear_all(&self) -> usize {
        let mut state = self.state.lock().await;
        let count = state.len();
        state.clear();
        count
    }

    /// Durably persists the full map.
    ///
    /// Serializes under the lock, then writes to a temporary file in the
    /// same directory and renames it over the final path. The rename is the
    /// only mutation of the final path, so a crash at any earlier point
    /// leaves the previous good file intact.
    pub async fn save(&self) -> Result<(), StateStoreError> {
        let json = {
            let state = self.state.lock().await;
            serde_json::to_vec_pretty(&*state).map_err(|source| StateStoreError::Parse {
                path: self.path.clone(),
                source,
            })?
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StateStoreError::Write {
                        path: self.path.clone(),
                        source,
                    })?;
            }
        }

        // Temporary file in the same directory so the rename stays on one
        // filesystem.
        let tmp_path = {
            let mut p = self.path.as_os_str().to_owned();
            p.push(".tmp");
            PathBuf::from(p)
        };

        tokio::fs::write(&tmp_path, &json)
            .await
            .map_err(|source| StateStoreError::Write {
                path: tmp_path.clone(),
                source,
            })?;

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| StateStoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), "State file saved");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ObjectName {
        ObjectName::new(s).unwrap()
    }

    #[tokio::test]
    async fn load_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::load(dir.path().join("state.json")).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = StateStore::load(&path).await.unwrap_err();
        assert!(matches!(err, StateStoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn set_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::load(dir.path().join("state.json")).await.unwrap();

        assert!(store.get(&name("a")).await.is_none());
        store.set(name("a"), SyncRecord::done(0)).await;
        assert_eq!(store.get(&name("a")).await, Some(SyncRecord::done(0)));

        // A later set replaces the record outright.
        store.set(name("a"), SyncRecord::failed(1, "boom")).await;
        assert_eq!(
            store.get(&name("a")).await,
            Some(SyncRecord::failed(1, "boom"))
        );
    }

    #[tokio::test]
    async fn save_and_reload_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = StateStore::load(&path).await.unwrap();
        store.set(name("x.txt"), SyncRecord::done(0)).await;
        store.set(name("y.txt"), SyncRecord::failed(2, "copy failed")).await;
        store.save().await.unwrap();

        let reloaded = StateStore::load(&path).await.unwrap();
        assert_eq!(reloaded.len().await, 2);
        assert_eq!(reloaded.get(&name("x.txt")).await, Some(SyncRecord::done(0)));
        assert_eq!(
            reloaded.get(&name("y.txt")).await,
            Some(SyncRecord::failed(2, "copy failed"))
        );
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = StateStore::load(&path).await.unwrap();
        store.set(name("a"), SyncRecord::done(0)).await;
        store.save().await.unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[tokio::test]
    async fn save_replaces_previous_file_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        // First generation on disk.
        let store = StateStore::load(&path).await.unwrap();
        store.set(name("a"), SyncRecord::done(0)).await;
        store.save().await.unwrap();

        // A leftover temp file from an interrupted earlier save must not
        // break the next save or the final file.
        std::fs::write(dir.path().join("state.json.tmp"), b"truncated garb").unwrap();

        store.set(name("b"), SyncRecord::done(1)).await;
        store.save().await.unwrap();

        let reloaded = StateStore::load(&path).await.unwrap();
        assert_eq!(reloaded.len().await, 2);
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/state.json");

        let store = StateStore::load(&path).await.unwrap();
        store.set(name("a"), SyncRecord::done(0)).await;
        store.save().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn state_file_uses_wire_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = StateStore::load(&path).await.unwrap();
        store.set(name("x.txt"), SyncRecord::done(0)).await;
        store.save().await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["x.txt"]["status"], "DONE");
        assert_eq!(raw["x.txt"]["retries"], 0);
        assert!(raw["x.txt"].get("error").is_none());
    }

    #[tokio::test]
    async fn loads_state_written_with_extra_fields() {
        // Forward compatibility: a newer binary may add optional record
        // fields; this one must still load the file.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            br#"{"a":{"status":"FAILED","retries":3,"error":"e","since":"2026-08-01"}}"#,
        )
        .unwrap();

        let store = StateStore::load(&path).await.unwrap();
        assert_eq!(store.get(&name("a")).await, Some(SyncRecord::failed(3, "e")));
    }

    #[tokio::test]
    async fn counts_split_done_and_failed() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::load(dir.path().join("state.json")).await.unwrap();
        store.set(name("a"), SyncRecord::done(0)).await;
        store.set(name("b"), SyncRecord::done(2)).await;
        store.set(name("c"), SyncRecord::failed(5, "e")).await;

        let counts = store.counts().await;
        assert_eq!(counts, StateCounts { done: 2, failed: 1 });
    }

    #[tokio::test]
    async fn clear_failed_keeps_done_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::load(dir.path().join("state.json")).await.unwrap();
        store.set(name("a"), SyncRecord::done(0)).await;
        store.set(name("b"), SyncRecord::failed(5, "e")).await;
        store.set(name("c"), SyncRecord::failed(1, "e")).await;

        assert_eq!(store.clear_failed().await, 2);
        assert_eq!(store.len().await, 1);
        assert!(store.get(&name("a")).await.is_some());
    }

    #[tokio::test]
    async fn clear_all_empties_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::load(dir.path().join("state.json")).await.unwrap();
        store.set(name("a"), SyncRecord::done(0)).await;
        store.set(name("b"), SyncRecord::failed(1, "e")).await;

        assert_eq!(store.clear_all().await, 2);
        assert!(store.is_empty().await);
    }
}
