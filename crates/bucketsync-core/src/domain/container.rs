//! Container references
//!
//! A [`ContainerRef`] names one storage container: the namespace it lives in,
//! the bucket name, and the provider region. Source and destination of a sync
//! run are each identified by one of these; they may point at different
//! regions or accounts.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Reference to a single object-storage container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRef {
    /// Tenancy namespace the bucket belongs to
    pub namespace: String,
    /// Bucket name
    pub bucket: String,
    /// Provider region identifier (e.g. `eu-frankfurt-1`)
    pub region: String,
}

impl ContainerRef {
    /// Create a validated container reference. All three components must be
    /// non-empty.
    pub fn new(
        namespace: impl Into<String>,
        bucket: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let namespace = namespace.into();
        let bucket = bucket.into();
        let region = region.into();

        if namespace.is_empty() {
            return Err(DomainError::InvalidContainer(
                "namespace must not be empty".to_string(),
            ));
        }
        if bucket.is_empty() {
            return Err(DomainError::InvalidContainer(
                "bucket must not be empty".to_string(),
            ));
        }
        if region.is_empty() {
            return Err(DomainError::InvalidContainer(
                "region must not be empty".to_string(),
            ));
        }

        Ok(Self {
            namespace,
            bucket,
            region,
        })
    }

    /// Default API endpoint for this container's region.
    ///
    /// Configuration may override this per side (useful for tests and
    /// non-standard deployments).
    #[must_use]
    pub fn default_endpoint(&self) -> String {
        format!("https://objectstorage.{}.oraclecloud.com", self.region)
    }
}

impl std::fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.namespace, self.bucket, self.region)
    }
}
