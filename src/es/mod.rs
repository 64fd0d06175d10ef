//! Elasticsearch connection layer for scry.
//!
//! Provides a trait-based interface over the store's search and query APIs,
//! allowing the HTTP client to be swapped for mocks in tests.

mod http;
mod mock;
mod types;

pub use http::HttpSearchClient;
pub use mock::{FailingSearchClient, MockSearchClient};
pub use types::{
    FilterHit, FilterRequest, FilterResponse, PipelineColumn, PipelineRequest, PipelineResponse,
};

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::EsConfig;
use crate::error::Result;

/// Trait defining the interface to the document store.
///
/// All operations are async and fail with a transport- or query-kind
/// `ScryError`; nothing here touches UI state.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Executes a filter-dialect search, returning one page of hits plus the
    /// store's reported total.
    async fn execute_filter(&self, request: &FilterRequest) -> Result<FilterResponse>;

    /// Executes a pipeline-dialect query, returning the complete result set.
    async fn execute_pipeline(&self, request: &PipelineRequest) -> Result<PipelineResponse>;

    /// Checks connectivity to the store.
    async fn ping(&self) -> Result<()>;
}

/// Builds a client for the configured store and verifies connectivity.
///
/// This is the central factory for store connections.
pub async fn connect(config: &EsConfig) -> Result<Arc<dyn SearchClient>> {
    let client = HttpSearchClient::new(config)?;
    client.ping().await?;
    Ok(Arc::new(client))
}
