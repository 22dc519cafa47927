//! Parsers turning an unwrapped, normalized envelope into public result types.

use serde_json::Value;

use crate::error::{FindingError, Result};
use crate::normalize::{normalize, to_array};
use crate::types::{PaginationOutput, SearchResponse, VersionResponse};

const FAILURE_ACK: &str = "Failure";

/// Parse the body of any item search operation.
///
/// `searchResult.item` is coerced to a sequence first, so a failure body
/// carries the same shape callers see on success.
pub fn parse_search_result(mut body: Value) -> Result<SearchResponse> {
    if let Some(result) = body.get_mut("searchResult").and_then(Value::as_object_mut) {
        if let Some(item) = result.remove("item") {
            result.insert("item".to_string(), Value::Array(to_array(Some(item))));
        }
    }

    check_ack(body)
        .map(|body| {
            let search_result = body.get("searchResult");
            let items: Vec<Value> = search_result
                .and_then(|r| r.get("item"))
                .cloned()
                .map(|item| to_array(Some(item)).into_iter().map(normalize).collect())
                .unwrap_or_default();

            SearchResponse {
                ack: text(&body, "ack"),
                version: text(&body, "version"),
                timestamp: text(&body, "timestamp"),
                search_result_count: count(search_result.and_then(|r| r.get("@count"))),
                search_result: items,
                pagination_output: pagination(body.get("paginationOutput")),
                item_search_url: text(&body, "itemSearchURL"),
            }
        })
}

/// Parse the body of `getVersion`.
pub fn parse_version(body: Value) -> Result<VersionResponse> {
    check_ack(body).map(|body| VersionResponse {
        ack: text(&body, "ack"),
        version: text(&body, "version"),
        timestamp: text(&body, "timestamp"),
    })
}

fn check_ack(body: Value) -> Result<Value> {
    if body.get("ack").and_then(Value::as_str) == Some(FAILURE_ACK) {
        tracing::warn!(errors = ?body.get("errorMessage"), "Finding service reported failure");
        return Err(FindingError::ServiceFailure(Box::new(body)));
    }
    Ok(body)
}

fn text(body: &Value, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Base-10 count from the service's string form; 0 when absent or malformed.
/// Parsing is strict after trimming, so trailing garbage (`"12abc"`) gives 0.
fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

fn pagination(value: Option<&Value>) -> PaginationOutput {
    let field = |key: &str| count(value.and_then(|v| v.get(key)));
    PaginationOutput {
        page_number: field("pageNumber"),
        entries_per_page: field("entriesPerPage"),
        total_pages: field("totalPages"),
        total_entries: field("totalEntries"),
    }
}
