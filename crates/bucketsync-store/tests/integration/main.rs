//! Integration tests for bucketsync-store
//!
//! Uses wiremock to simulate the Object Storage REST API and verifies
//! end-to-end behavior of the HTTP adapter: listing pagination, the
//! 404-vs-failure probe distinction, and the server-side copy call.

mod common;

mod test_copy;
mod test_exists;
mod test_list;
