use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FindingError, Result};

/// Flat call parameters. Values may be scalars, sequences or mappings;
/// the transport flattens them into the service's query syntax.
pub type Params = serde_json::Map<String, Value>;

/// Operations exposed by the Finding service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FindItemsAdvanced,
    FindItemsByCategory,
    FindItemsByKeywords,
    FindItemsByProduct,
    FindItemsIneBayStores,
    FindCompletedItems,
    GetHistograms,
    GetSearchKeywordsRecommendation,
    GetVersion,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::FindItemsAdvanced,
        Operation::FindItemsByCategory,
        Operation::FindItemsByKeywords,
        Operation::FindItemsByProduct,
        Operation::FindItemsIneBayStores,
        Operation::FindCompletedItems,
        Operation::GetHistograms,
        Operation::GetSearchKeywordsRecommendation,
        Operation::GetVersion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FindItemsAdvanced => "findItemsAdvanced",
            Operation::FindItemsByCategory => "findItemsByCategory",
            Operation::FindItemsByKeywords => "findItemsByKeywords",
            Operation::FindItemsByProduct => "findItemsByProduct",
            Operation::FindItemsIneBayStores => "findItemsIneBayStores",
            Operation::FindCompletedItems => "findCompletedItems",
            Operation::GetHistograms => "getHistograms",
            Operation::GetSearchKeywordsRecommendation => "getSearchKeywordsRecommendation",
            Operation::GetVersion => "getVersion",
        }
    }

    /// Key of the envelope wrapping this operation's response body.
    pub fn response_key(&self) -> String {
        format!("{}Response", self.as_str())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = FindingError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FindingError::InvalidArgument {
                kind: "operation",
                value: s.to_string(),
                valid: Operation::ALL.iter().map(Operation::as_str).collect(),
            })
    }
}

/// How a product lookup key is interpreted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductIdType {
    ReferenceId,
    Isbn,
    Upc,
    Ean,
}

impl ProductIdType {
    pub const ALL: [ProductIdType; 4] = [
        ProductIdType::ReferenceId,
        ProductIdType::Isbn,
        ProductIdType::Upc,
        ProductIdType::Ean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductIdType::ReferenceId => "ReferenceID",
            ProductIdType::Isbn => "ISBN",
            ProductIdType::Upc => "UPC",
            ProductIdType::Ean => "EAN",
        }
    }
}

impl fmt::Display for ProductIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductIdType {
    type Err = FindingError;

    fn from_str(s: &str) -> Result<Self> {
        ProductIdType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FindingError::InvalidArgument {
                kind: "product id type",
                value: s.to_string(),
                valid: ProductIdType::ALL.iter().map(ProductIdType::as_str).collect(),
            })
    }
}

/// Page position reported alongside a search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOutput {
    #[serde(rename = "pageNumber")]
    pub page_number: u64,
    #[serde(rename = "entriesPerPage")]
    pub entries_per_page: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    #[serde(rename = "totalEntries")]
    pub total_entries: u64,
}

/// Normalized result of any item search operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub ack: String,
    pub version: String,
    pub timestamp: String,
    #[serde(rename = "searchResultCount")]
    pub search_result_count: u64,
    /// Item records, always a sequence even for a single hit.
    #[serde(rename = "searchResult")]
    pub search_result: Vec<Value>,
    #[serde(rename = "paginationOutput")]
    pub pagination_output: PaginationOutput,
    #[serde(rename = "itemSearchURL")]
    pub item_search_url: String,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.ack == "Success"
    }

    /// Parsed form of the service timestamp, if it is valid RFC 3339.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Deserialize the item records into a caller-defined type.
    pub fn items_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.search_result
            .iter()
            .map(|item| T::deserialize(item).map_err(|e| FindingError::Decode(e.to_string())))
            .collect()
    }
}

/// Result of `getVersion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    pub ack: String,
    pub version: String,
    pub timestamp: String,
}
