//! JSON fixtures for Relay connection pages.

use serde_json::{Value, json};

/// Cursor used for the edge at `index` in [`linear_pages`].
///
/// Zero-padded so cursors sort in walk order.
#[must_use]
pub fn cursor(index: usize) -> String {
    format!("cursor-{index:04}")
}

/// A `pageInfo` object.
#[must_use]
pub fn page_info(
    has_next_page: bool,
    has_previous_page: bool,
    start_cursor: &str,
    end_cursor: &str,
) -> Value {
    json!({
        "hasNextPage": has_next_page,
        "hasPreviousPage": has_previous_page,
        "startCursor": start_cursor,
        "endCursor": end_cursor,
    })
}

/// A connection object: `totalCount`, `pageInfo` and `edges`.
#[must_use]
pub fn connection_page(total_count: u64, page_info: Value, edges: Vec<(String, Value)>) -> Value {
    let edges: Vec<Value> = edges
        .into_iter()
        .map(|(cursor, node)| json!({"cursor": cursor, "node": node}))
        .collect();
    json!({
        "totalCount": total_count,
        "pageInfo": page_info,
        "edges": edges,
    })
}

/// Wrap a connection object in the `{"data": {<connection>: ...}}` envelope.
#[must_use]
pub fn envelope(connection: &str, page: Value) -> Value {
    json!({ "data": { connection: page } })
}

/// Split `total` nodes into forward pages of `page_size`.
///
/// Edge `i` gets [`cursor`]`(i)`; each page's `endCursor` is the cursor of its
/// last edge, and only the final page reports `hasNextPage = false`. An empty
/// connection yields a single empty page.
#[must_use]
pub fn linear_pages(total: usize, page_size: usize, node: impl Fn(usize) -> Value) -> Vec<Value> {
    let page_size = page_size.max(1);
    let total_count = total as u64;
    if total == 0 {
        return vec![connection_page(0, page_info(false, false, "", ""), Vec::new())];
    }

    let mut pages = Vec::new();
    let mut start = 0;
    while start < total {
        let end = (start + page_size).min(total);
        let edges: Vec<(String, Value)> = (start..end).map(|i| (cursor(i), node(i))).collect();
        let info = page_info(end < total, start > 0, &cursor(start), &cursor(end - 1));
        pages.push(connection_page(total_count, info, edges));
        start = end;
    }
    pages
}
