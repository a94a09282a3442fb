//! Source enumeration
//!
//! Walks the source container's paginated listing to a complete in-memory
//! `Vec<ObjectName>`. The work set must be known up front so the run can
//! report totals and fan out; a listing failure is therefore run-fatal
//! rather than a per-object outcome.

use std::sync::Arc;

use bucketsync_core::domain::{ContainerRef, ObjectName};
use bucketsync_core::ports::IObjectStore;
use tracing::{debug, info};

use crate::RunError;

/// Materializes the full source listing via continuation tokens.
pub struct SourceEnumerator {
    store: Arc<dyn IObjectStore>,
    container: ContainerRef,
    prefix: Option<String>,
}

impl SourceEnumerator {
    /// Creates an enumerator for one container, with an optional
    /// provider-side name prefix filter.
    pub fn new(store: Arc<dyn IObjectStore>, container: ContainerRef, prefix: Option<String>) -> Self {
        Self {
            store,
            container,
            prefix,
        }
    }

    /// Fetches every page until the provider stops returning a continuation
    /// token. Names come back in provider order.
    pub async fn list_all(&self) -> Result<Vec<ObjectName>, RunError> {
        let mut names = Vec::new();
        let mut start: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let page = self
                .store
                .list_page(&self.container, self.prefix.as_deref(), start.as_deref())
                .await
                .map_err(RunError::List)?;

            pages += 1;
            debug!(
                container = %self.container,
                page = pages,
                count = page.names.len(),
                "Fetched source page"
            );
            names.extend(page.names);

            match page.next_start {
                Some(token) => start = Some(token),
                None => break,
            }
        }

        info!(
            container = %self.container,
            total = names.len(),
            pages,
            "Source enumeration complete"
        );
        Ok(names)
    }
}
