//! Object store port (driven/secondary port)
//!
//! This module defines the interface for the remote object-storage backend.
//! The primary implementation targets an OCI-style Object Storage REST API
//! (`bucketsync-store`), but the trait is provider-agnostic: the engine only
//! needs paginated listing, an existence probe, and a server-side copy.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - `exists` folds the provider's "not found" response into `Ok(false)`.
//!   Any *other* failure must surface as `Err`; the engine records those as
//!   per-object failures instead of treating an outage as "object missing".
//!   Adapters must never blur that line.
//! - `copy_object` asks the backend to copy entirely on the provider side;
//!   no object bytes ever flow through this process.

use crate::domain::{ContainerRef, ObjectName};

// ============================================================================
// ListPage DTO
// ============================================================================

/// One page of a paginated listing.
///
/// Port-level DTO: `next_start` is the provider's opaque continuation token,
/// present when more pages remain.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Object names on this page, in provider order
    pub names: Vec<ObjectName>,
    /// Continuation token for the next page; `None` on the last page
    pub next_start: Option<String>,
}

// ============================================================================
// IObjectStore trait
// ============================================================================

/// Port trait for remote object-storage operations
///
/// One instance is bound to one region endpoint; a cross-region sync run
/// holds two (source and destination). Implementations handle wire formats,
/// authentication headers, and error mapping.
#[async_trait::async_trait]
pub trait IObjectStore: Send + Sync {
    /// Fetches one page of object names from `container`.
    ///
    /// # Arguments
    /// * `container` - The container to list
    /// * `prefix` - Optional name prefix filter applied provider-side
    /// * `start` - Continuation token from the previous page, or `None` for
    ///   the first page
    async fn list_page(
        &self,
        container: &ContainerRef,
        prefix: Option<&str>,
        start: Option<&str>,
    ) -> anyhow::Result<ListPage>;

    /// Metadata-only existence probe for a single object.
    ///
    /// Returns `Ok(true)` when the object exists, `Ok(false)` when the
    /// provider reports it absent, and `Err` for every other failure class
    /// (auth, throttling, outage, ...).
    async fn exists(&self, container: &ContainerRef, name: &ObjectName) -> anyhow::Result<bool>;

    /// Issues a single server-side copy request.
    ///
    /// The request is addressed to the *source* container's region, naming
    /// the destination container and object. Success means the backend has
    /// accepted/completed the copy per its own consistency contract; this
    /// call performs no follow-up verification.
    async fn copy_object(
        &self,
        source: &ContainerRef,
        dest: &ContainerRef,
        source_name: &ObjectName,
        dest_name: &ObjectName,
    ) -> anyhow::Result<()>;
}
