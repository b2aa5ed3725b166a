//! Mock GraphQL server serving Relay connection pages.
//!
//! Wraps wiremock. Each POST body is parsed as a GraphQL request and the page
//! to return is selected by its `variables.cursor`.

use serde_json::Value;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use crate::fixtures::envelope;

/// A mock GraphQL endpoint for connection walks.
pub struct MockConnectionServer {
    server: MockServer,
}

impl MockConnectionServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Underlying wiremock server for custom mounts.
    #[must_use]
    pub const fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Serve `pages` (connection objects) under `connection`.
    ///
    /// The first page answers an empty cursor; page `n + 1` answers the
    /// `endCursor` advertised by page `n`. Unknown cursors get a 400.
    pub async fn serve_pages(&self, connection: &str, pages: Vec<Value>) {
        let mut keyed = Vec::with_capacity(pages.len());
        let mut request_cursor = String::new();
        for page in pages {
            let next = page["pageInfo"]["endCursor"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            keyed.push((request_cursor, envelope(connection, page)));
            request_cursor = next;
        }

        Mock::given(method("POST"))
            .respond_with(PageResponder { pages: keyed })
            .mount(&self.server)
            .await;
    }

    /// Respond to every request with `status` and a raw body.
    pub async fn fail_with(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far.
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }

    /// `variables.cursor` of every request received so far, in arrival order.
    pub async fn received_cursors(&self) -> Vec<String> {
        self.received_bodies()
            .await
            .iter()
            .map(|body| {
                body["variables"]["cursor"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }
}

struct PageResponder {
    pages: Vec<(String, Value)>,
}

impl Respond for PageResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return ResponseTemplate::new(400).set_body_string("request body is not JSON");
        };
        let cursor = body["variables"]["cursor"].as_str().unwrap_or_default();

        self.pages
            .iter()
            .find(|(expected, _)| expected == cursor)
            .map_or_else(
                || ResponseTemplate::new(400).set_body_string(format!("unknown cursor {cursor:?}")),
                |(_, page)| ResponseTemplate::new(200).set_body_json(page.clone()),
            )
    }
}
