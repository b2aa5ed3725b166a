//! Relay Test Kit - test tooling for connection clients.
//!
//! - [`init_test_tracing`] and friends install a test-friendly subscriber once.
//! - [`MockConnectionServer`] serves scripted Relay pages over HTTP, choosing
//!   the page from the `cursor` variable of each request.
//! - [`fixtures`] builds page and envelope JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use relay_testkit::{MockConnectionServer, fixtures};
//!
//! #[tokio::test]
//! async fn walks_two_pages() {
//!     relay_testkit::init_test_tracing();
//!
//!     let mock = MockConnectionServer::start().await;
//!     let pages = fixtures::linear_pages(3, 2, |i| serde_json::json!({"id": i.to_string()}));
//!     mock.serve_pages("programsConnection", pages).await;
//!
//!     // point a client at mock.uri() ...
//!     assert_eq!(mock.received_cursors().await, vec!["", "cursor-0001"]);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]

pub mod fixtures;
mod mock_server;
mod tracing_config;

pub use mock_server::*;
pub use tracing_config::*;
