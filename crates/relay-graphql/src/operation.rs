//! Request and response envelope types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GraphqlClientError, GraphqlError};

/// Immutable GraphQL document text.
///
/// Cloning is cheap, so one built document can be shared by every page
/// request of a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphqlQuery {
    query: Arc<str>,
}

impl GraphqlQuery {
    /// Create a new query from a string.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Arc::from(query.into()),
        }
    }

    /// Return the query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.query
    }
}

impl std::fmt::Display for GraphqlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query)
    }
}

/// GraphQL request payload, serialized as the POST body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<V> {
    /// Query text.
    pub query: GraphqlQuery,
    /// Variables.
    pub variables: V,
    /// Optional operation name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl<V> GraphqlRequest<V> {
    /// Create a new request.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(query: GraphqlQuery, variables: V) -> Self {
        Self {
            query,
            variables,
            operation_name: None,
        }
    }

    /// Attach an operation name.
    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// GraphQL response container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphqlResponse<T> {
    /// Response data.
    #[serde(default)]
    pub data: Option<T>,
    /// GraphQL errors.
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
    /// Extensions payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl<T> GraphqlResponse<T> {
    /// Returns `true` if no GraphQL errors were returned.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Return the data, treating any GraphQL error as a failure.
    pub fn into_data(self) -> Result<T, GraphqlClientError> {
        if !self.errors.is_empty() {
            return Err(GraphqlClientError::GraphqlErrors {
                errors: self.errors,
            });
        }
        self.data.ok_or_else(|| GraphqlClientError::Protocol {
            message: "missing GraphQL data".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_query_and_variables() {
        let request = GraphqlRequest::new(
            GraphqlQuery::new("query { viewer { id } }"),
            serde_json::json!({"count": 10}),
        );
        let body = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({
                "query": "query { viewer { id } }",
                "variables": {"count": 10}
            })
        );

        let named = request.with_operation_name("Viewer");
        let body = serde_json::to_value(&named).expect("serialize");
        assert_eq!(body["operationName"], "Viewer");
    }

    #[test]
    fn into_data_surfaces_graphql_errors() {
        let response: GraphqlResponse<serde_json::Value> = serde_json::from_value(
            serde_json::json!({"data": null, "errors": [{"message": "denied"}]}),
        )
        .expect("decode");
        assert!(!response.is_ok());
        let err = response.into_data().expect_err("errors must fail");
        assert!(matches!(err, GraphqlClientError::GraphqlErrors { ref errors } if errors.len() == 1));
    }

    #[test]
    fn into_data_requires_data() {
        let response: GraphqlResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({})).expect("decode");
        assert!(matches!(
            response.into_data(),
            Err(GraphqlClientError::Protocol { .. })
        ));
    }

    #[test]
    fn cloned_query_shares_text() {
        let query = GraphqlQuery::new("query { a }");
        let copy = query.clone();
        assert_eq!(query, copy);
        assert_eq!(copy.to_string(), "query { a }");
    }
}
