//! Domain types for bucketsync
//!
//! This module contains the core domain types:
//! - Newtypes for validated identifiers (`ObjectName`, `RunId`)
//! - Container references (`ContainerRef`)
//! - Per-object sync records (`SyncRecord`, `SyncStatus`)
//! - Domain-specific error types

pub mod container;
pub mod errors;
pub mod newtypes;
pub mod record;

// Re-export commonly used types
pub use container::ContainerRef;
pub use errors::DomainError;
pub use newtypes::{ObjectName, RunId};
pub use record::{SyncRecord, SyncStatus};
