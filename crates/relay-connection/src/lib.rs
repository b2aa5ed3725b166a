//! Relay Connection - typed pagination over Relay cursor connections.
//!
//! This crate provides:
//! - Filter types that render to GraphQL input text.
//! - Field selections derived from node types.
//! - A registry routing filter discriminators to connections.
//! - A forward pagination driver delivering pages to a handler.
//!
//! ```no_run
//! # async fn demo() -> Result<(), relay_connection::ConnectionError> {
//! use relay_connection::nodes::{Program, ProgramFilter};
//! use relay_connection::{
//!     ConnectionClient, ConnectionClientConfig, ConnectionRegistry, StringFilter,
//! };
//! use relay_graphql::OperatorContext;
//!
//! let config = ConnectionClientConfig::new("https://api.example.test/user/");
//! let client = ConnectionClient::from_config(&config, ConnectionRegistry::with_defaults()?)?;
//! let filter = ProgramFilter {
//!     name: Some(StringFilter::contains("Bada")),
//!     ..ProgramFilter::default()
//! };
//! let programs: Vec<Program> = client
//!     .collect_nodes(&OperatorContext::new("token"), &filter)
//!     .await?;
//! # let _ = programs;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

mod config;
mod driver;
mod error;
mod filter;
mod input;
mod introspect;
pub mod nodes;
mod page;
mod query;
mod registry;
pub mod telemetry;

pub use config::ConnectionClientConfig;
pub use driver::{ConnectionClient, WalkSummary};
pub use error::{ConnectionError, HandlerError, IntrospectionError};
pub use filter::{
    BooleanFilter, ConnectionFilter, EntityStatus, EqualityOperator, StatusFilter, StringFilter,
    StringOperator, UuidFilter, UuidOperator, render_filter,
};
pub use introspect::{ConnectionNode, FieldSelection, field_selection};
pub use page::{
    ConnectionResponse, DEFAULT_PAGE_SIZE, Direction, Edge, MAX_PAGE_SIZE, PageInfo,
    PageSizeLimits, Pager,
};
pub use query::{ConnectionQuery, build_query, render_connection_query};
pub use registry::{ConnectionRegistry, Registration};
