//! bucketsync Store - HTTP object-storage adapter
//!
//! Implements the [`IObjectStore`](bucketsync_core::ports::IObjectStore)
//! port against an OCI-style Object Storage REST API:
//!
//! - `GET  /n/{ns}/b/{bucket}/o` - paginated listing
//! - `HEAD /n/{ns}/b/{bucket}/o/{name}` - existence probe
//! - `POST /n/{ns}/b/{bucket}/actions/copyObject` - server-side copy
//!
//! ## Modules
//!
//! - [`client`] - Endpoint/URL construction and request authorization
//! - [`adapter`] - The [`HttpObjectStore`] port implementation

pub mod adapter;
pub mod client;

pub use adapter::HttpObjectStore;
pub use client::{BearerTokenAuthorizer, NoopAuthorizer, ObjectStorageClient, RequestAuthorizer};
