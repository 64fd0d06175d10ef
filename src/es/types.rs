//! Request and response types for the Elasticsearch connection layer.
//!
//! These are the wire-level shapes exchanged with the store. The dialect
//! adapters build the requests and normalize the responses; the client only
//! executes them.

use serde::Deserialize;

use crate::time_range::TimeBounds;

/// A filter-dialect search request against the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    /// Index pattern to search (e.g. `logs-*`).
    pub index_pattern: String,
    /// Free-text filter expression; empty means match-all.
    pub expression: String,
    /// Result offset for server-side paging.
    pub offset: u64,
    /// Page size, already bounded by the configured maximum.
    pub limit: u64,
    /// Field used for time filtering and default sort.
    pub time_field: String,
    /// Optional time window restricting the search.
    pub bounds: Option<TimeBounds>,
}

/// One hit from a filter-dialect search.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterHit {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Index the document lives in.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document fields. Order is preserved as the store returned them.
    #[serde(rename = "_source", default)]
    pub source: serde_json::Map<String, serde_json::Value>,
}

/// Response to a filter-dialect search.
#[derive(Debug, Clone, Default)]
pub struct FilterResponse {
    /// Matching documents for the requested page.
    pub hits: Vec<FilterHit>,
    /// The store's reported total hit count, when present.
    pub total: Option<u64>,
}

/// A pipeline-dialect request against the query API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// The full pipeline text, including any spliced time filter stage.
    pub query: String,
}

/// Column metadata in a pipeline-dialect response.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineColumn {
    /// Column name.
    pub name: String,
    /// Store-side type name (informational only).
    #[serde(rename = "type", default)]
    pub data_type: String,
}

/// Response to a pipeline-dialect request: the complete result set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineResponse {
    /// Result columns in response order.
    #[serde(default)]
    pub columns: Vec<PipelineColumn>,
    /// Row values, positionally aligned with `columns`.
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}
