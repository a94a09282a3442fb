//! bucketsync Core - Domain types and port definitions
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `ObjectName`, `ContainerRef`, `SyncRecord`, `RunId`
//! - **Port definitions** - The `IObjectStore` trait that storage adapters implement
//! - **Configuration** - YAML configuration with validation and a builder
//!
//! # Architecture
//!
//! The domain module contains pure types with no I/O. Ports define trait
//! interfaces that adapter crates implement (`bucketsync-store` for the HTTP
//! object-storage adapter). The engine crate orchestrates domain types
//! through the port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
