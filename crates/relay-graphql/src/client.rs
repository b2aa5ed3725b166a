//! GraphQL HTTP client implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::context::OperatorContext;
use crate::error::GraphqlClientError;
use crate::operation::{GraphqlRequest, GraphqlResponse};

/// GraphQL client metrics.
#[derive(Debug, Default)]
#[allow(clippy::struct_field_names)]
pub struct GraphqlClientMetrics {
    requests_total: AtomicU64,
    requests_success: AtomicU64,
    requests_error: AtomicU64,
    requests_cancelled: AtomicU64,
}

impl GraphqlClientMetrics {
    /// Snapshot current metrics.
    #[must_use]
    pub fn snapshot(&self) -> GraphqlClientMetricsSnapshot {
        GraphqlClientMetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_success: self.requests_success.load(Ordering::Relaxed),
            requests_error: self.requests_error.load(Ordering::Relaxed),
            requests_cancelled: self.requests_cancelled.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_field_names)]
pub struct GraphqlClientMetricsSnapshot {
    /// Requests attempted, including those cancelled before sending.
    pub requests_total: u64,
    /// Requests answered with a 2xx status and no GraphQL errors.
    pub requests_success: u64,
    /// Requests that failed in transport, status, decoding or GraphQL errors.
    pub requests_error: u64,
    /// Requests abandoned because the operator context was cancelled.
    pub requests_cancelled: u64,
}

/// GraphQL client configuration.
#[derive(Debug, Clone)]
pub struct GraphqlClientConfig {
    /// Service name used in logs.
    pub service_name: String,
    /// Default headers applied to every request.
    pub headers: HeaderMap,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for GraphqlClientConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            service_name: "graphql".to_string(),
            headers,
            timeout: Duration::from_secs(30),
            user_agent: format!("relay-graphql/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// GraphQL client builder.
#[derive(Debug, Clone)]
pub struct GraphqlClientBuilder {
    endpoint: String,
    config: GraphqlClientConfig,
}

impl GraphqlClientBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            config: GraphqlClientConfig::default(),
        }
    }

    /// Set the service name used in logs.
    #[must_use]
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.config.service_name = service_name.into();
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.config.headers.insert(name, value);
        self
    }

    /// Set timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<GraphqlClient, GraphqlClientError> {
        GraphqlClient::with_config(self.endpoint, self.config)
    }
}

/// GraphQL client.
///
/// Cheap to clone; clones share the underlying connection pool and metrics,
/// so one client can serve any number of concurrent walks.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    endpoint: String,
    http: reqwest::Client,
    config: GraphqlClientConfig,
    metrics: Arc<GraphqlClientMetrics>,
}

impl GraphqlClient {
    /// Create a client with custom configuration.
    pub fn with_config(
        endpoint: impl Into<String>,
        config: GraphqlClientConfig,
    ) -> Result<Self, GraphqlClientError> {
        let http = reqwest::Client::builder()
            .default_headers(config.headers.clone())
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
            config,
            metrics: Arc::new(GraphqlClientMetrics::default()),
        })
    }

    /// Endpoint URL requests are POSTed to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Return client metrics snapshot.
    #[must_use]
    pub fn metrics(&self) -> GraphqlClientMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Execute a request and return the full response envelope.
    ///
    /// GraphQL-level errors are left in the envelope; see
    /// [`GraphqlClient::execute_strict`] to treat them as failures.
    #[instrument(skip_all, fields(service = %self.config.service_name))]
    pub async fn execute_request<V, R>(
        &self,
        request: &GraphqlRequest<V>,
        ctx: &OperatorContext,
    ) -> Result<GraphqlResponse<R>, GraphqlClientError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(request)?;
        let result = self.round_trip(body, ctx).await.and_then(|bytes| {
            serde_json::from_slice::<GraphqlResponse<R>>(&bytes).map_err(GraphqlClientError::from)
        });

        match &result {
            Ok(response) if response.is_ok() => {
                self.metrics
                    .requests_success
                    .fetch_add(1, Ordering::Relaxed);
            }
            Ok(response) => {
                debug!(errors = response.errors.len(), "GraphQL response carried errors");
                self.metrics.requests_error.fetch_add(1, Ordering::Relaxed);
            }
            Err(GraphqlClientError::Cancelled) => {
                self.metrics
                    .requests_cancelled
                    .fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                warn!(error = %err, "GraphQL request failed");
                self.metrics.requests_error.fetch_add(1, Ordering::Relaxed);
            }
        }

        result
    }

    /// Execute a request and return data only (error on GraphQL errors).
    pub async fn execute_strict<V, R>(
        &self,
        request: &GraphqlRequest<V>,
        ctx: &OperatorContext,
    ) -> Result<R, GraphqlClientError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        self.execute_request(request, ctx).await?.into_data()
    }

    async fn round_trip(
        &self,
        body: Vec<u8>,
        ctx: &OperatorContext,
    ) -> Result<Vec<u8>, GraphqlClientError> {
        self.metrics.requests_total.fetch_add(1, Ordering::Relaxed);
        if ctx.is_cancelled() {
            return Err(GraphqlClientError::Cancelled);
        }

        tokio::select! {
            result = self.send_once(body, ctx) => result,
            () = ctx.cancelled() => {
                debug!("operator context cancelled mid-request");
                Err(GraphqlClientError::Cancelled)
            }
        }
    }

    async fn send_once(
        &self,
        body: Vec<u8>,
        ctx: &OperatorContext,
    ) -> Result<Vec<u8>, GraphqlClientError> {
        let mut request = self.http.post(&self.endpoint).body(body);
        if let Some(token) = ctx.bearer_token() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(GraphqlClientError::HttpStatus {
                status,
                body: truncate_body(&bytes),
            });
        }

        Ok(bytes.to_vec())
    }
}

fn truncate_body(bytes: &[u8]) -> String {
    const MAX_LEN: usize = 4096;
    let mut body = String::from_utf8_lossy(bytes).to_string();
    if body.len() > MAX_LEN {
        let mut cut = MAX_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}
