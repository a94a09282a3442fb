//! Server-side copy tests.

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use bucketsync_core::domain::ObjectName;
use bucketsync_core::ports::IObjectStore;

use crate::common::{dest_container, setup_store, source_container};

#[tokio::test]
async fn test_copy_accepted() {
    let (server, store) = setup_store().await;

    // Copy is addressed to the source bucket and names the destination in
    // the request body.
    Mock::given(method("POST"))
        .and(path("/n/acme-ns/b/reports/actions/copyObject"))
        .and(body_partial_json(serde_json::json!({
            "sourceObjectName": "x.txt",
            "destinationNamespace": "acme-ns",
            "destinationBucket": "reports-backup",
            "destinationRegion": "us-ashburn-1",
            "destinationObjectName": "x.txt"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let name = ObjectName::new("x.txt").unwrap();
    store
        .copy_object(&source_container(), &dest_container(), &name, &name)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_copy_with_renamed_destination() {
    let (server, store) = setup_store().await;

    Mock::given(method("POST"))
        .and(path("/n/acme-ns/b/reports/actions/copyObject"))
        .and(body_partial_json(serde_json::json!({
            "sourceObjectName": "x.txt",
            "destinationObjectName": "archive/x.txt"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let src = ObjectName::new("x.txt").unwrap();
    let dst = ObjectName::new("archive/x.txt").unwrap();
    store
        .copy_object(&source_container(), &dest_container(), &src, &dst)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_copy_rejection_surfaces_body() {
    let (server, store) = setup_store().await;

    Mock::given(method("POST"))
        .and(path("/n/acme-ns/b/reports/actions/copyObject"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("internal copy worker failure"),
        )
        .mount(&server)
        .await;

    let name = ObjectName::new("x.txt").unwrap();
    let err = store
        .copy_object(&source_container(), &dest_container(), &name, &name)
        .await
        .unwrap_err();
    let message = format!("{}", err);
    assert!(message.contains("500"));
    assert!(message.contains("internal copy worker failure"));
}

#[tokio::test]
async fn test_copy_throttled_is_err() {
    let (server, store) = setup_store().await;

    Mock::given(method("POST"))
        .and(path("/n/acme-ns/b/reports/actions/copyObject"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let name = ObjectName::new("x.txt").unwrap();
    assert!(store
        .copy_object(&source_container(), &dest_container(), &name, &name)
        .await
        .is_err());
}
