//! Shared test helpers for object-store integration tests
//!
//! Provides wiremock-based mock server setup. Each test gets a fresh
//! MockServer plus an [`HttpObjectStore`] pointed at it.

use std::sync::Arc;

use wiremock::MockServer;

use bucketsync_core::domain::ContainerRef;
use bucketsync_store::client::{NoopAuthorizer, ObjectStorageClient, RequestAuthorizer};
use bucketsync_store::HttpObjectStore;

/// Starts a mock server and returns it with an adapter targeting it.
pub async fn setup_store() -> (MockServer, HttpObjectStore) {
    setup_store_with_authorizer(Arc::new(NoopAuthorizer)).await
}

/// Variant that installs a specific authorizer (for header assertions).
pub async fn setup_store_with_authorizer(
    authorizer: Arc<dyn RequestAuthorizer>,
) -> (MockServer, HttpObjectStore) {
    let server = MockServer::start().await;
    let client = ObjectStorageClient::new(server.uri(), authorizer)
        .expect("mock server URI must parse");
    (server, HttpObjectStore::new(client))
}

/// Container used by most tests: `acme-ns/reports@eu-frankfurt-1`.
pub fn source_container() -> ContainerRef {
    ContainerRef::new("acme-ns", "reports", "eu-frankfurt-1").unwrap()
}

/// Destination container in a different region.
pub fn dest_container() -> ContainerRef {
    ContainerRef::new("acme-ns", "reports-backup", "us-ashburn-1").unwrap()
}
