//! Relay GraphQL - HTTP transport for cursor-connection queries.
//!
//! This crate provides:
//! - A GraphQL-over-HTTP client that POSTs `query` + `variables` documents.
//! - Per-request operator context (bearer token, cancellation signal).
//! - Response envelope types and a client error taxonomy.
//!
//! The client performs exactly one round-trip per call and never retries;
//! [`GraphqlClientError::is_retryable`] is a hint for callers that want to.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

mod client;
mod context;
mod error;
mod operation;

pub use client::{
    GraphqlClient, GraphqlClientBuilder, GraphqlClientConfig, GraphqlClientMetrics,
    GraphqlClientMetricsSnapshot,
};
pub use context::OperatorContext;
pub use error::{
    GraphqlClientError, GraphqlError, GraphqlErrorLocation, GraphqlPathSegment, HttpErrorInfo,
};
pub use operation::{GraphqlQuery, GraphqlRequest, GraphqlResponse};
