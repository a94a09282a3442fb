//! HTTP implementation of the object store port
//!
//! Maps the three port operations onto the Object Storage REST API:
//!
//! - `list_page` - `GET /n/{ns}/b/{bucket}/o?limit=1000[&prefix=..][&start=..]`
//! - `exists`    - `HEAD /n/{ns}/b/{bucket}/o/{name}` (404 means absent)
//! - `copy_object` - `POST /n/{ns}/b/{bucket}/actions/copyObject` (expects 202)
//!
//! The adapter owns the wire formats and the 404-vs-error distinction; the
//! engine above it never sees HTTP types.

use anyhow::{Context, Result};
use bucketsync_core::domain::{ContainerRef, ObjectName};
use bucketsync_core::ports::{IObjectStore, ListPage};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ObjectStorageClient;

/// Page size requested from the listing endpoint
const LIST_PAGE_LIMIT: u32 = 1000;

// ============================================================================
// Wire types
// ============================================================================

/// Response from the listing endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListObjectsResponse {
    /// Objects on this page
    #[serde(default)]
    objects: Vec<ObjectSummary>,
    /// Continuation token; absent on the last page
    next_start_with: Option<String>,
}

/// One object entry in a listing response
#[derive(Debug, Deserialize)]
struct ObjectSummary {
    /// Full object name
    name: String,
}

/// Request body for the server-side copy action
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CopyObjectDetails<'a> {
    /// Name of the object to copy, in the bucket the request is addressed to
    source_object_name: &'a str,
    /// Namespace of the destination bucket
    destination_namespace: &'a str,
    /// Destination bucket name
    destination_bucket: &'a str,
    /// Region of the destination bucket
    destination_region: &'a str,
    /// Name the copy is stored under
    destination_object_name: &'a str,
}

// ============================================================================
// HttpObjectStore
// ============================================================================

/// [`IObjectStore`] implementation backed by the REST API.
///
/// One instance per region endpoint. Cheap to construct; holds a connection
/// pool via the inner `reqwest::Client`.
pub struct HttpObjectStore {
    client: ObjectStorageClient,
}

impl HttpObjectStore {
    /// Creates an adapter over an already-configured client.
    pub fn new(client: ObjectStorageClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IObjectStore for HttpObjectStore {
    async fn list_page(
        &self,
        container: &ContainerRef,
        prefix: Option<&str>,
        start: Option<&str>,
    ) -> Result<ListPage> {
        let url = self.client.list_url(container)?;
        let mut request = self
            .client
            .request(Method::GET, url)
            .query(&[("limit", LIST_PAGE_LIMIT.to_string())]);
        if let Some(prefix) = prefix {
            request = request.query(&[("prefix", prefix)]);
        }
        if let Some(start) = start {
            request = request.query(&[("start", start)]);
        }

        let response: ListObjectsResponse = request
            .send()
            .await
            .with_context(|| format!("Failed to list objects in {}", container))?
            .error_for_status()
            .with_context(|| format!("List request for {} returned error status", container))?
            .json()
            .await
            .with_context(|| format!("Failed to parse list response for {}", container))?;

        debug!(
            container = %container,
            count = response.objects.len(),
            has_more = response.next_start_with.is_some(),
            "Fetched listing page"
        );

        let names = response
            .objects
            .into_iter()
            .map(|o| ObjectName::new(o.name))
            .collect::<Result<Vec<_>, _>>()
            .context("Listing contained an invalid object name")?;

        Ok(ListPage {
            names,
            next_start: response.next_start_with,
        })
    }

    async fn exists(&self, container: &ContainerRef, name: &ObjectName) -> Result<bool> {
        let url = self.client.object_url(container, name)?;
        let response = self
            .client
            .request(Method::HEAD, url)
            .send()
            .await
            .with_context(|| format!("Failed to probe {} in {}", name, container))?;

        // Only a definitive 404 means "absent". Anything else that is not a
        // success must surface as an error, or an outage would be mistaken
        // for a missing object.
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(anyhow::anyhow!(
                "Probe of {} in {} returned {}",
                name,
                container,
                status
            )),
        }
    }

    async fn copy_object(
        &self,
        source: &ContainerRef,
        dest: &ContainerRef,
        source_name: &ObjectName,
        dest_name: &ObjectName,
    ) -> Result<()> {
        let url = self.client.copy_url(source)?;
        let body = CopyObjectDetails {
            source_object_name: source_name.as_str(),
            destination_namespace: &dest.namespace,
            destination_bucket: &dest.bucket,
            destination_region: &dest.region,
            destination_object_name: dest_name.as_str(),
        };

        let response = self
            .client
            .request(Method::POST, url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to request copy of {}", source_name))?;

        let status = response.status();
        if status.is_success() {
            debug!(
                source = %source_name,
                dest = %dest_name,
                %status,
                "Copy request accepted"
            );
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(anyhow::anyhow!(
                "Copy of {} to {} returned {}: {}",
                source_name,
                dest,
                status,
                detail.trim()
            ))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
