//! bucketsync State - Durable JSON ledger of per-object sync outcomes
//!
//! Provides [`StateStore`], the single shared mutable structure of a sync
//! run: a map from object name to [`SyncRecord`] guarded by one async mutex
//! and persisted atomically to a local JSON file.

mod store;

pub use store::{StateCounts, StateStore, StateStoreError};
