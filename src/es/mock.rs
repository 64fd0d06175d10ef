//! Mock store clients for testing.
//!
//! Provide in-memory implementations of SearchClient so the session and
//! pagination logic can be exercised without a running store. Call counters
//! let tests assert how many network round-trips a scenario performed.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::{FilterHit, FilterRequest, FilterResponse, PipelineRequest, PipelineResponse};
use super::SearchClient;
use crate::error::{Result, ScryError};

/// A mock client serving a fixed corpus of generated documents.
pub struct MockSearchClient {
    /// Total documents available to filter searches.
    corpus_size: u64,
    /// Rows returned by pipeline queries.
    pipeline_rows: usize,
    filter_calls: AtomicUsize,
    pipeline_calls: AtomicUsize,
}

impl MockSearchClient {
    /// Creates a mock with a 250-document corpus and 12 pipeline rows.
    pub fn new() -> Self {
        Self::with_sizes(250, 12)
    }

    /// Creates a mock with the given corpus and pipeline result sizes.
    pub fn with_sizes(corpus_size: u64, pipeline_rows: usize) -> Self {
        Self {
            corpus_size,
            pipeline_rows,
            filter_calls: AtomicUsize::new(0),
            pipeline_calls: AtomicUsize::new(0),
        }
    }

    /// Number of filter searches executed so far.
    pub fn filter_calls(&self) -> usize {
        self.filter_calls.load(Ordering::SeqCst)
    }

    /// Number of pipeline queries executed so far.
    pub fn pipeline_calls(&self) -> usize {
        self.pipeline_calls.load(Ordering::SeqCst)
    }

    /// Builds the document at the given corpus position.
    fn document(position: u64) -> FilterHit {
        let mut source = serde_json::Map::new();
        source.insert(
            "@timestamp".to_string(),
            json!(format!("2024-01-01T00:{:02}:00.000Z", position % 60)),
        );
        source.insert(
            "status".to_string(),
            json!(if position % 7 == 0 { 500 } else { 200 }),
        );
        source.insert("method".to_string(), json!("GET"));
        source.insert(
            "message".to_string(),
            json!(format!("request {position} handled")),
        );

        FilterHit {
            id: format!("doc-{position}"),
            index: "logs-2024".to_string(),
            source,
        }
    }
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn execute_filter(&self, request: &FilterRequest) -> Result<FilterResponse> {
        self.filter_calls.fetch_add(1, Ordering::SeqCst);

        let start = request.offset.min(self.corpus_size);
        let end = (request.offset + request.limit).min(self.corpus_size);
        let hits = (start..end).map(Self::document).collect();

        Ok(FilterResponse {
            hits,
            total: Some(self.corpus_size),
        })
    }

    async fn execute_pipeline(&self, _request: &PipelineRequest) -> Result<PipelineResponse> {
        self.pipeline_calls.fetch_add(1, Ordering::SeqCst);

        let raw = json!({
            "columns": [
                {"name": "host", "type": "keyword"},
                {"name": "avg_response", "type": "double"}
            ],
            "values": (0..self.pipeline_rows)
                .map(|i| json!([format!("web-{i}"), 50.0 + i as f64]))
                .collect::<Vec<_>>(),
        });

        serde_json::from_value(raw).map_err(|e| ScryError::internal(e.to_string()))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// A client whose every operation fails with a transport error.
pub struct FailingSearchClient {
    message: String,
}

impl FailingSearchClient {
    /// Creates a failing client with the default message.
    pub fn new() -> Self {
        Self::with_message("connection refused")
    }

    /// Creates a failing client with a custom error message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchClient for FailingSearchClient {
    async fn execute_filter(&self, _request: &FilterRequest) -> Result<FilterResponse> {
        Err(ScryError::transport(self.message.clone()))
    }

    async fn execute_pipeline(&self, _request: &PipelineRequest) -> Result<PipelineResponse> {
        Err(ScryError::transport(self.message.clone()))
    }

    async fn ping(&self) -> Result<()> {
        Err(ScryError::transport(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_request(offset: u64, limit: u64) -> FilterRequest {
        FilterRequest {
            index_pattern: "*".to_string(),
            expression: String::new(),
            offset,
            limit,
            time_field: "@timestamp".to_string(),
            bounds: None,
        }
    }

    #[tokio::test]
    async fn test_mock_filter_pages() {
        let client = MockSearchClient::with_sizes(25, 0);

        let first = client.execute_filter(&filter_request(0, 10)).await.unwrap();
        assert_eq!(first.hits.len(), 10);
        assert_eq!(first.total, Some(25));
        assert_eq!(first.hits[0].id, "doc-0");

        let last = client.execute_filter(&filter_request(20, 10)).await.unwrap();
        assert_eq!(last.hits.len(), 5);
        assert_eq!(last.hits[0].id, "doc-20");

        assert_eq!(client.filter_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_pipeline_counts_calls() {
        let client = MockSearchClient::with_sizes(0, 3);
        let request = PipelineRequest {
            query: "FROM logs".to_string(),
        };

        let response = client.execute_pipeline(&request).await.unwrap();
        assert_eq!(response.columns.len(), 2);
        assert_eq!(response.values.len(), 3);
        assert_eq!(client.pipeline_calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = FailingSearchClient::new();
        let err = client.ping().await.unwrap_err();
        assert_eq!(err.category(), "Transport Error");
    }
}
