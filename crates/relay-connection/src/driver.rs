//! Pagination driver: walks a connection page by page.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::sync::Arc;

use relay_graphql::{GraphqlClient, GraphqlClientBuilder, GraphqlRequest, OperatorContext};
use tracing::{debug, error, instrument};

use crate::config::ConnectionClientConfig;
use crate::error::{ConnectionError, HandlerError};
use crate::filter::ConnectionFilter;
use crate::introspect::ConnectionNode;
use crate::page::{ConnectionResponse, Direction, PageInfo, PageSizeLimits, Pager};
use crate::query::{ConnectionQuery, build_query};
use crate::registry::ConnectionRegistry;

/// Totals for a completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Pages delivered to the handler.
    pub pages: usize,
    /// Edges across all delivered pages.
    pub edges: usize,
    /// `totalCount` reported by the last page.
    pub total_count: Option<u64>,
}

/// Client that walks Relay connections for registered filter/node pairs.
///
/// Cheap to clone. Each walk owns its own pagination state; only the HTTP
/// connection pool is shared.
#[derive(Debug, Clone)]
pub struct ConnectionClient {
    graphql: GraphqlClient,
    registry: Arc<ConnectionRegistry>,
    limits: PageSizeLimits,
    page_size: u32,
}

impl ConnectionClient {
    /// Create a driver over an existing GraphQL client.
    #[must_use]
    pub fn new(graphql: GraphqlClient, registry: ConnectionRegistry) -> Self {
        Self {
            graphql,
            registry: Arc::new(registry),
            limits: PageSizeLimits::default(),
            page_size: 0,
        }
    }

    /// Build the HTTP client and driver from configuration.
    pub fn from_config(
        config: &ConnectionClientConfig,
        registry: ConnectionRegistry,
    ) -> Result<Self, ConnectionError> {
        config.validate()?;
        let graphql = GraphqlClientBuilder::new(config.endpoint.clone())
            .with_service_name(config.service_name.clone())
            .with_timeout(config.timeout)
            .build()?;
        Ok(Self::new(graphql, registry).with_page_size_limits(config.page_size_limits()))
    }

    /// Requested page size; 0 uses the default. Clamped to the maximum.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Replace the page size limits.
    #[must_use]
    pub const fn with_page_size_limits(mut self, limits: PageSizeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Registered connections.
    #[must_use]
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Underlying GraphQL client.
    #[must_use]
    pub const fn graphql(&self) -> &GraphqlClient {
        &self.graphql
    }

    /// Build the query document for `filter` without executing it.
    pub fn query_text<F, N>(&self, filter: &F) -> Result<ConnectionQuery, ConnectionError>
    where
        F: ConnectionFilter,
        N: ConnectionNode,
    {
        build_query::<F, N>(&self.registry, filter)
    }

    /// Walk every page matching `filter` forward, handing each page to
    /// `handler` in cursor order.
    ///
    /// The first error (transport, decode, handler or cancellation) aborts
    /// the walk and is returned. Pages already handed over stay delivered;
    /// nothing is retried.
    #[instrument(skip_all, fields(filter_type = F::FILTER_TYPE))]
    pub async fn walk<F, N, H, E>(
        &self,
        ctx: &OperatorContext,
        filter: &F,
        mut handler: H,
    ) -> Result<WalkSummary, ConnectionError>
    where
        F: ConnectionFilter,
        N: ConnectionNode,
        H: FnMut(ConnectionResponse<N>) -> Result<(), E>,
        E: Into<HandlerError>,
    {
        let built = build_query::<F, N>(&self.registry, filter).inspect_err(|err| {
            error!(filter_type = F::FILTER_TYPE, error = %err, "cannot build connection query");
        })?;
        debug!(
            connection = %built.connection_name,
            filter = %built.filter_text,
            "starting connection walk"
        );

        let direction = Direction::Forward;
        let mut summary = WalkSummary::default();
        let mut page_info: Option<PageInfo> = None;
        // The first page is requested with the empty cursor, so an empty
        // continuation cursor also counts as a repeat.
        let mut requested: HashSet<String> = HashSet::new();

        while page_info.as_ref().is_none_or(|info| info.has_more(direction)) {
            let pager = Pager::next(page_info.as_ref(), direction, self.page_size, self.limits);
            let fetched = if requested.insert(pager.cursor.clone()) {
                self.fetch_page::<N>(ctx, &built, &pager).await
            } else {
                Err(ConnectionError::StalledCursor {
                    cursor: pager.cursor.clone(),
                })
            };
            let result = fetched.and_then(|page| {
                summary.pages += 1;
                summary.edges += page.edges.len();
                summary.total_count = Some(page.total_count);
                page_info = Some(page.page_info.clone());
                handler(page).map_err(|err| ConnectionError::Handler(err.into()))
            });
            if let Err(err) = result {
                log_failure(&built, &pager, summary.pages, &err);
                return Err(err);
            }
        }

        debug!(
            connection = %built.connection_name,
            pages = summary.pages,
            edges = summary.edges,
            "connection walk complete"
        );
        Ok(summary)
    }

    /// Walk every page and gather the nodes in order.
    pub async fn collect_nodes<F, N>(
        &self,
        ctx: &OperatorContext,
        filter: &F,
    ) -> Result<Vec<N>, ConnectionError>
    where
        F: ConnectionFilter,
        N: ConnectionNode,
    {
        let mut nodes = Vec::new();
        self.walk::<F, N, _, Infallible>(ctx, filter, |page| {
            nodes.extend(page.into_nodes());
            Ok(())
        })
        .await?;
        Ok(nodes)
    }

    async fn fetch_page<N: ConnectionNode>(
        &self,
        ctx: &OperatorContext,
        built: &ConnectionQuery,
        pager: &Pager,
    ) -> Result<ConnectionResponse<N>, ConnectionError> {
        let request = GraphqlRequest::new(built.query.clone(), pager);
        let mut envelope: HashMap<String, ConnectionResponse<N>> =
            self.graphql.execute_strict(&request, ctx).await?;
        envelope
            .remove(&built.connection_name)
            .ok_or_else(|| ConnectionError::MissingConnection {
                connection: built.connection_name.clone(),
            })
    }
}

fn log_failure(built: &ConnectionQuery, pager: &Pager, page: usize, err: &ConnectionError) {
    error!(
        connection = %built.connection_name,
        filter_type = built.filter_type,
        filter = %built.filter_text,
        direction = ?pager.direction,
        cursor = %pager.cursor,
        count = pager.count,
        page,
        query = %built.query,
        error = %err,
        "connection walk failed"
    );
}
