//! Connection query documents.

use relay_graphql::GraphqlQuery;

use crate::error::ConnectionError;
use crate::filter::{ConnectionFilter, render_filter};
use crate::introspect::ConnectionNode;
use crate::registry::ConnectionRegistry;

/// A query document built for one filter value.
///
/// The text depends only on the connection, the filter value and the node
/// fields; page variables are sent separately, so one query serves a whole
/// walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionQuery {
    /// Connection field queried and key of the response envelope.
    pub connection_name: String,
    /// Discriminator of the filter the query was built from.
    pub filter_type: &'static str,
    /// Rendered filter predicate; empty when unfiltered.
    pub filter_text: String,
    /// Full query document.
    pub query: GraphqlQuery,
}

/// Build the query document for `filter`, decoding nodes as `N`.
///
/// Fails with [`ConnectionError::Unsupported`] when `F` has no registered
/// connection for `N`.
pub fn build_query<F, N>(
    registry: &ConnectionRegistry,
    filter: &F,
) -> Result<ConnectionQuery, ConnectionError>
where
    F: ConnectionFilter,
    N: ConnectionNode,
{
    let registration = registry.resolve::<F, N>()?;
    let filter_text = render_filter(filter)?;
    let text = render_connection_query(
        registration.connection_name(),
        &filter_text,
        &registration.selection().to_query_text(),
    );
    Ok(ConnectionQuery {
        connection_name: registration.connection_name().to_string(),
        filter_type: F::FILTER_TYPE,
        filter_text,
        query: GraphqlQuery::new(text),
    })
}

/// Render the connection query template.
///
/// `filter` is GraphQL input text or empty for no filter argument; `fields` is
/// the space-separated node selection.
#[must_use]
pub fn render_connection_query(connection: &str, filter: &str, fields: &str) -> String {
    let filter_arg = if filter.is_empty() {
        String::new()
    } else {
        format!(", filter: {filter}")
    };
    format!(
        r"query ($direction: ConnectionDirection!, $cursor: String, $count: PageSize) {{
  {connection}(direction: $direction, directionArgs: {{count: $count, cursor: $cursor}}{filter_arg}) {{
    totalCount
    pageInfo {{
      hasNextPage
      hasPreviousPage
      startCursor
      endCursor
    }}
    edges {{
      cursor
      node {{
        {fields}
      }}
    }}
  }}
}}"
    )
}
