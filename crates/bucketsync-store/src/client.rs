//! Object Storage REST client
//!
//! Provides endpoint/URL construction and request authorization for an
//! OCI-style Object Storage API. The [`ObjectStorageClient`] wraps a
//! `reqwest::Client` and builds fully-encoded URLs for the three calls
//! the synchronizer needs (list, head, copy).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bucketsync_store::client::{BearerTokenAuthorizer, ObjectStorageClient};
//!
//! # fn example() -> anyhow::Result<()> {
//! let auth = Arc::new(BearerTokenAuthorizer::from_env("BUCKETSYNC_TOKEN")?);
//! let client = ObjectStorageClient::new(
//!     "https://objectstorage.eu-frankfurt-1.oraclecloud.com",
//!     auth,
//! )?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use bucketsync_core::domain::{ContainerRef, ObjectName};
use reqwest::{Client, Method, RequestBuilder};
use url::Url;

// ============================================================================
// Request authorization
// ============================================================================

/// Attaches credentials to an outgoing request.
///
/// Kept as a trait so the HTTP adapter stays agnostic of the credential
/// scheme: production uses a bearer token read from the environment, tests
/// use [`NoopAuthorizer`].
pub trait RequestAuthorizer: Send + Sync {
    /// Returns the builder with authorization applied.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Authorizer that sets `Authorization: Bearer <token>` on every request.
pub struct BearerTokenAuthorizer {
    /// The bearer token value
    token: String,
}

impl BearerTokenAuthorizer {
    /// Creates an authorizer from an explicit token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Reads the token from the named environment variable.
    ///
    /// # Errors
    /// Returns an error if the variable is unset or empty.
    pub fn from_env(var: &str) -> Result<Self> {
        let token = std::env::var(var)
            .with_context(|| format!("Environment variable {} is not set", var))?;
        if token.trim().is_empty() {
            anyhow::bail!("Environment variable {} is empty", var);
        }
        Ok(Self::new(token))
    }
}

impl RequestAuthorizer for BearerTokenAuthorizer {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

/// Authorizer that leaves requests untouched (for tests and local mocks).
pub struct NoopAuthorizer;

impl RequestAuthorizer for NoopAuthorizer {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }
}

// ============================================================================
// ObjectStorageClient
// ============================================================================

/// HTTP client for Object Storage API calls
///
/// Wraps `reqwest::Client` with a base endpoint and an authorizer, and
/// builds the `/n/{ns}/b/{bucket}/...` URL family with proper
/// percent-encoding of object names.
pub struct ObjectStorageClient {
    /// The underlying HTTP client
    client: Client,
    /// Base endpoint for API requests
    endpoint: Url,
    /// Credential attachment strategy
    authorizer: Arc<dyn RequestAuthorizer>,
}

impl ObjectStorageClient {
    /// Creates a client for the given endpoint.
    ///
    /// # Arguments
    /// * `endpoint` - Base URL such as
    ///   `https://objectstorage.{region}.oraclecloud.com` (also accepts a
    ///   mock server URI in tests)
    /// * `authorizer` - Credential strategy applied to every request
    ///
    /// # Errors
    /// Returns an error if `endpoint` is not a valid absolute URL.
    pub fn new(endpoint: impl AsRef<str>, authorizer: Arc<dyn RequestAuthorizer>) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref())
            .with_context(|| format!("Invalid endpoint URL: {}", endpoint.as_ref()))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            authorizer,
        })
    }

    /// Returns the base endpoint of this client.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL for listing objects: `/n/{ns}/b/{bucket}/o`
    pub fn list_url(&self, container: &ContainerRef) -> Result<Url> {
        self.build_url(&["n", &container.namespace, "b", &container.bucket, "o"])
    }

    /// URL for a single object: `/n/{ns}/b/{bucket}/o/{name}`
    ///
    /// The object name is pushed as one path segment, so slashes and other
    /// reserved characters in the name are percent-encoded.
    pub fn object_url(&self, container: &ContainerRef, name: &ObjectName) -> Result<Url> {
        self.build_url(&[
            "n",
            &container.namespace,
            "b",
            &container.bucket,
            "o",
            name.as_str(),
        ])
    }

    /// URL for the server-side copy action:
    /// `/n/{ns}/b/{bucket}/actions/copyObject`
    pub fn copy_url(&self, container: &ContainerRef) -> Result<Url> {
        self.build_url(&[
            "n",
            &container.namespace,
            "b",
            &container.bucket,
            "actions",
            "copyObject",
        ])
    }

    /// Creates an authorized request builder for the given method and URL.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.authorizer
            .authorize(self.client.request(method, url))
    }

    fn build_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Endpoint URL cannot be a base: {}", self.endpoint))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ObjectStorageClient {
        ObjectStorageClient::new(
            "https://objectstorage.eu-frankfurt-1.oraclecloud.com",
            Arc::new(NoopAuthorizer),
        )
        .unwrap()
    }

    fn container() -> ContainerRef {
        ContainerRef::new("acme-ns", "reports", "eu-frankfurt-1").unwrap()
    }

    #[test]
    fn test_list_url_shape() {
        let url = client().list_url(&container()).unwrap();
        assert_eq!(url.path(), "/n/acme-ns/b/reports/o");
    }

    #[test]
    fn test_object_url_plain_name() {
        let name = ObjectName::new("report.csv").unwrap();
        let url = client().object_url(&container(), &name).unwrap();
        assert_eq!(url.path(), "/n/acme-ns/b/reports/o/report.csv");
    }

    #[test]
    fn test_object_url_encodes_reserved_characters() {
        let name = ObjectName::new("2024/q1/summary report.csv").unwrap();
        let url = client().object_url(&container(), &name).unwrap();
        assert_eq!(
            url.path(),
            "/n/acme-ns/b/reports/o/2024%2Fq1%2Fsummary%20report.csv"
        );
    }

    #[test]
    fn test_copy_url_shape() {
        let url = client().copy_url(&container()).unwrap();
        assert_eq!(url.path(), "/n/acme-ns/b/reports/actions/copyObject");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = ObjectStorageClient::new("not a url", Arc::new(NoopAuthorizer));
        assert!(result.is_err());
    }

    #[test]
    fn test_bearer_from_env_missing() {
        assert!(BearerTokenAuthorizer::from_env("BUCKETSYNC_TEST_UNSET_TOKEN").is_err());
    }
}
