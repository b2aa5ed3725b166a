//! Relay page types: page info, pager variables, edges and connection pages.

use serde::{Deserialize, Deserializer, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size ever requested.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Follow `endCursor` while `hasNextPage`.
    #[default]
    Forward,
    /// Follow `startCursor` while `hasPreviousPage`.
    Backward,
}

/// Pagination state reported by a connection page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// More rows follow this page.
    #[serde(default)]
    pub has_next_page: bool,
    /// Rows precede this page.
    #[serde(default)]
    pub has_previous_page: bool,
    /// Cursor of the first edge; empty when the page is empty.
    #[serde(default, deserialize_with = "nullable_string")]
    pub start_cursor: String,
    /// Cursor of the last edge; empty when the page is empty.
    #[serde(default, deserialize_with = "nullable_string")]
    pub end_cursor: String,
}

impl PageInfo {
    /// Returns `true` if another page exists in `direction`.
    #[must_use]
    pub const fn has_more(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.has_next_page,
            Direction::Backward => self.has_previous_page,
        }
    }

    /// Cursor to continue from in `direction`.
    #[must_use]
    pub fn continuation_cursor(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.end_cursor,
            Direction::Backward => &self.start_cursor,
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Default and maximum page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeLimits {
    /// Applied when the requested count is 0.
    pub default: u32,
    /// Upper bound for any request.
    pub max: u32,
}

impl Default for PageSizeLimits {
    fn default() -> Self {
        Self {
            default: DEFAULT_PAGE_SIZE,
            max: MAX_PAGE_SIZE,
        }
    }
}

impl PageSizeLimits {
    /// Effective count for a requested page size.
    #[must_use]
    pub fn clamp(&self, requested: u32) -> u32 {
        let max = self.max.max(1);
        let count = if requested == 0 { self.default } else { requested };
        count.clamp(1, max)
    }
}

/// Variables sent with each page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pager {
    /// Traversal direction.
    pub direction: Direction,
    /// Cursor to continue from; empty for the first page.
    pub cursor: String,
    /// Page size, already clamped.
    pub count: u32,
}

impl Pager {
    /// Pager for the first page of a walk.
    #[must_use]
    pub fn first(direction: Direction, requested: u32, limits: PageSizeLimits) -> Self {
        Self {
            direction,
            cursor: String::new(),
            count: limits.clamp(requested),
        }
    }

    /// Pager following `previous`, or the first pager when nothing was
    /// fetched yet.
    #[must_use]
    pub fn next(
        previous: Option<&PageInfo>,
        direction: Direction,
        requested: u32,
        limits: PageSizeLimits,
    ) -> Self {
        let mut pager = Self::first(direction, requested, limits);
        if let Some(info) = previous {
            info.continuation_cursor(direction)
                .clone_into(&mut pager.cursor);
        }
        pager
    }
}

/// One row of a connection page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<N> {
    /// Cursor of this row.
    #[serde(default, deserialize_with = "nullable_string")]
    pub cursor: String,
    /// Row data.
    pub node: N,
}

/// A decoded connection page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResponse<N> {
    /// Total rows matching the filter across all pages.
    #[serde(default)]
    pub total_count: u64,
    /// Pagination state.
    #[serde(default)]
    pub page_info: PageInfo,
    /// Rows of this page.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<N>>,
}

impl<N> ConnectionResponse<N> {
    /// Pagination state of this page.
    #[must_use]
    pub const fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    /// Nodes of this page in edge order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Consume the page, keeping only its nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<N> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}
