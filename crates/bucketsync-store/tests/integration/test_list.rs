//! Listing endpoint tests: pagination, prefix filtering, and failures.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use bucketsync_core::ports::IObjectStore;

use crate::common::{setup_store, source_container};

#[tokio::test]
async fn test_single_page_listing() {
    let (server, store) = setup_store().await;

    Mock::given(method("GET"))
        .and(path("/n/acme-ns/b/reports/o"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objects": [{"name": "a.txt"}, {"name": "b.txt"}]
        })))
        .mount(&server)
        .await;

    let page = store
        .list_page(&source_container(), None, None)
        .await
        .unwrap();

    let names: Vec<&str> = page.names.iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert!(page.next_start.is_none());
}

#[tokio::test]
async fn test_continuation_token_forwarded() {
    let (server, store) = setup_store().await;

    // First page carries a token; second page is requested with start=<token>.
    Mock::given(method("GET"))
        .and(path("/n/acme-ns/b/reports/o"))
        .and(query_param("start", "b.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objects": [{"name": "c.txt"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/n/acme-ns/b/reports/o"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objects": [{"name": "a.txt"}, {"name": "b.txt"}],
            "nextStartWith": "b.txt"
        })))
        .mount(&server)
        .await;

    let first = store
        .list_page(&source_container(), None, None)
        .await
        .unwrap();
    assert_eq!(first.next_start.as_deref(), Some("b.txt"));

    let second = store
        .list_page(&source_container(), None, first.next_start.as_deref())
        .await
        .unwrap();
    assert_eq!(second.names.len(), 1);
    assert_eq!(second.names[0].as_str(), "c.txt");
    assert!(second.next_start.is_none());
}

#[tokio::test]
async fn test_prefix_is_passed_to_provider() {
    let (server, store) = setup_store().await;

    Mock::given(method("GET"))
        .and(path("/n/acme-ns/b/reports/o"))
        .and(query_param("prefix", "2024/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objects": [{"name": "2024/q1.csv"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = store
        .list_page(&source_container(), Some("2024/"), None)
        .await
        .unwrap();
    assert_eq!(page.names[0].as_str(), "2024/q1.csv");
}

#[tokio::test]
async fn test_empty_bucket() {
    let (server, store) = setup_store().await;

    Mock::given(method("GET"))
        .and(path("/n/acme-ns/b/reports/o"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"objects": []})),
        )
        .mount(&server)
        .await;

    let page = store
        .list_page(&source_container(), None, None)
        .await
        .unwrap();
    assert!(page.names.is_empty());
    assert!(page.next_start.is_none());
}

#[tokio::test]
async fn test_server_error_is_an_error() {
    let (server, store) = setup_store().await;

    Mock::given(method("GET"))
        .and(path("/n/acme-ns/b/reports/o"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = store.list_page(&source_container(), None, None).await;
    assert!(result.is_err());
}
