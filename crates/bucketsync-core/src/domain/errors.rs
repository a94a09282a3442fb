//! Domain error types
//!
//! This module defines error types for domain-level validation failures.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid object name (empty or otherwise unusable as a state key)
    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),

    /// Invalid container reference component
    #[error("Invalid container reference: {0}")]
    InvalidContainer(String),

    /// ID parsing error
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}
