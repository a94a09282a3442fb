//! Existence probe tests.
//!
//! The critical distinction: a 404 means "absent", while any other
//! non-success response must be an error, never a false "absent".

use std::sync::Arc;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use bucketsync_core::domain::ObjectName;
use bucketsync_core::ports::IObjectStore;
use bucketsync_store::client::BearerTokenAuthorizer;

use crate::common::{setup_store, setup_store_with_authorizer, source_container};

#[tokio::test]
async fn test_present_object() {
    let (server, store) = setup_store().await;

    Mock::given(method("HEAD"))
        .and(path("/n/acme-ns/b/reports/o/x.txt"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let name = ObjectName::new("x.txt").unwrap();
    assert!(store.exists(&source_container(), &name).await.unwrap());
}

#[tokio::test]
async fn test_absent_object_is_ok_false() {
    let (server, store) = setup_store().await;

    Mock::given(method("HEAD"))
        .and(path("/n/acme-ns/b/reports/o/missing.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let name = ObjectName::new("missing.txt").unwrap();
    assert!(!store.exists(&source_container(), &name).await.unwrap());
}

#[tokio::test]
async fn test_outage_is_err_not_absent() {
    let (server, store) = setup_store().await;

    Mock::given(method("HEAD"))
        .and(path("/n/acme-ns/b/reports/o/x.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let name = ObjectName::new("x.txt").unwrap();
    let result = store.exists(&source_container(), &name).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_unauthorized_is_err() {
    let (server, store) = setup_store().await;

    Mock::given(method("HEAD"))
        .and(path("/n/acme-ns/b/reports/o/x.txt"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let name = ObjectName::new("x.txt").unwrap();
    assert!(store.exists(&source_container(), &name).await.is_err());
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let authorizer = Arc::new(BearerTokenAuthorizer::new("test-token-123"));
    let (server, store) = setup_store_with_authorizer(authorizer).await;

    Mock::given(method("HEAD"))
        .and(path("/n/acme-ns/b/reports/o/x.txt"))
        .and(header("authorization", "Bearer test-token-123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let name = ObjectName::new("x.txt").unwrap();
    assert!(store.exists(&source_container(), &name).await.unwrap());
}
