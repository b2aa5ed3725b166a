//! Error types for connection walks.

use relay_graphql::GraphqlClientError;
use thiserror::Error;

/// Boxed error returned by a caller's page handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to derive a field selection from a node type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectionError {
    /// The node's zero value could not be serialized.
    #[error("cannot serialize zero value of {type_name}: {message}")]
    Serialize {
        /// Node type.
        type_name: &'static str,
        /// Serializer message.
        message: String,
    },

    /// The node does not serialize to a JSON object.
    #[error("{type_name} does not serialize to a JSON object")]
    NotAnObject {
        /// Node type.
        type_name: &'static str,
    },

    /// The field-name pattern did not line up with the node's JSON shape.
    #[error("match failed for {type_name}: {detail}")]
    MatchFailed {
        /// Node type.
        type_name: &'static str,
        /// What did not match.
        detail: String,
    },

    /// The same field name was extracted twice.
    #[error("duplicate field {field:?} in {type_name}")]
    Duplicate {
        /// Node type.
        type_name: &'static str,
        /// Repeated field name.
        field: String,
    },
}

/// Error type for connection queries and walks.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// No connection is registered for the filter's discriminator, or it is
    /// registered for a different node type.
    #[error("unsupported filter type {filter_type:?}: {reason}")]
    Unsupported {
        /// Filter discriminator.
        filter_type: &'static str,
        /// Why the pair was rejected.
        reason: String,
    },

    /// Field selection could not be derived.
    #[error("schema introspection failed: {0}")]
    Introspection(#[from] IntrospectionError),

    /// The filter could not be rendered.
    #[error("filter rendering failed: {0}")]
    Render(String),

    /// Network, status, decode or GraphQL-level failure.
    #[error(transparent)]
    Transport(#[from] GraphqlClientError),

    /// The response envelope lacked the expected connection key.
    #[error("response is missing connection {connection:?}")]
    MissingConnection {
        /// Expected key.
        connection: String,
    },

    /// The server reported more pages but the continuation cursor is empty
    /// or was already requested in this walk.
    #[error("pagination stalled at cursor {cursor:?}")]
    StalledCursor {
        /// Cursor that would have been requested.
        cursor: String,
    },

    /// The caller's page handler failed.
    #[error("page handler failed: {0}")]
    Handler(#[source] HandlerError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ConnectionError {
    /// Returns `true` for [`ConnectionError::Unsupported`].
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Returns `true` if the walk stopped because the operator context was
    /// cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(GraphqlClientError::Cancelled))
    }
}
