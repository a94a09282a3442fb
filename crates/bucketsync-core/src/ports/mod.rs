//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the interfaces the engine depends on; implementations live in
//! adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IObjectStore`] - Remote object-storage operations (list, existence
//!   probe, server-side copy)

pub mod object_store;

pub use object_store::{IObjectStore, ListPage};
