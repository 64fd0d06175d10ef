//! HTTP client for the Elasticsearch REST API.
//!
//! Implements the SearchClient trait over the `_search` and `_query`
//! endpoints using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::types::{FilterHit, FilterRequest, FilterResponse, PipelineRequest, PipelineResponse};
use super::SearchClient;
use crate::config::EsConfig;
use crate::error::{Result, ScryError};

/// HTTP implementation of the store connection.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    config: EsConfig,
    client: Client,
}

impl HttpSearchClient {
    /// Creates a new client from the given configuration.
    pub fn new(config: &EsConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_certs)
            .build()
            .map_err(|e| ScryError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Returns the base URL without a trailing slash.
    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    /// Applies basic auth credentials when configured.
    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.username {
            Some(user) => builder.basic_auth(user, self.config.password.as_ref()),
            None => builder,
        }
    }

    /// Sends a POST with a JSON body and returns the response body on success.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<String> {
        let response = self
            .with_auth(self.client.post(url))
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScryError::transport("Request timed out. Try a narrower time range.")
                } else if e.is_connect() {
                    ScryError::transport(format!(
                        "Failed to connect to the store at {}",
                        self.base_url()
                    ))
                } else {
                    ScryError::transport(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ScryError::transport(format!("Failed to read response: {e}")))?;

        if status.is_success() {
            return Ok(text);
        }

        let reason = extract_error_reason(&text).unwrap_or_else(|| status.to_string());
        match status.as_u16() {
            400 => Err(ScryError::query(reason)),
            401 | 403 => Err(ScryError::transport(format!(
                "Authentication failed: {reason}"
            ))),
            504 => Err(ScryError::transport(
                "Query timed out at the gateway. Try a narrower time range or add a LIMIT.",
            )),
            _ => Err(ScryError::transport(format!(
                "Store error ({status}): {reason}"
            ))),
        }
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn execute_filter(&self, request: &FilterRequest) -> Result<FilterResponse> {
        let url = format!("{}/{}/_search", self.base_url(), request.index_pattern);
        let body = build_filter_body(request);
        debug!(offset = request.offset, limit = request.limit, "filter search");

        let text = self
            .post_json(&url, &body, Duration::from_secs(self.config.timeout_secs))
            .await?;

        let raw: RawSearchResponse = serde_json::from_str(&text)
            .map_err(|e| ScryError::transport(format!("Malformed search response: {e}")))?;

        Ok(FilterResponse {
            total: parse_total(raw.hits.total.as_ref()),
            hits: raw.hits.hits,
        })
    }

    async fn execute_pipeline(&self, request: &PipelineRequest) -> Result<PipelineResponse> {
        let url = format!("{}/_query", self.base_url());
        let body = json!({ "query": request.query });
        debug!("pipeline query");

        let text = self
            .post_json(
                &url,
                &body,
                Duration::from_secs(self.config.pipeline_timeout_secs),
            )
            .await?;

        serde_json::from_str(&text)
            .map_err(|e| ScryError::transport(format!("Malformed query response: {e}")))
    }

    async fn ping(&self) -> Result<()> {
        let response = self
            .with_auth(self.client.get(self.base_url()))
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ScryError::transport(format!(
                        "Cannot connect to the store at {}",
                        self.base_url()
                    ))
                } else {
                    ScryError::transport(format!("Ping failed: {e}"))
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(ScryError::transport("Authentication failed"))
        } else {
            Err(ScryError::transport(format!("Store returned {status}")))
        }
    }
}

/// Builds the JSON search body for a filter request.
///
/// The time window and the user expression become clauses of a `bool` query;
/// with neither present the body degenerates to `match_all`. Results sort on
/// the time field, newest first, matching the store's log-browsing default.
fn build_filter_body(request: &FilterRequest) -> serde_json::Value {
    let mut clauses = Vec::new();

    if let Some(bounds) = &request.bounds {
        clauses.push(json!({
            "range": {
                &request.time_field: {
                    "gte": bounds.start,
                    "lte": bounds.end,
                }
            }
        }));
    }

    if !request.expression.trim().is_empty() {
        clauses.push(json!({
            "query_string": { "query": request.expression }
        }));
    }

    let query = match clauses.len() {
        0 => json!({ "match_all": {} }),
        1 => clauses.into_iter().next().unwrap_or_default(),
        _ => json!({ "bool": { "must": clauses } }),
    };

    json!({
        "query": query,
        "size": request.limit,
        "from": request.offset,
        "sort": [{ &request.time_field: { "order": "desc" } }],
    })
}

/// Extracts the `error.reason` field from a store error body.
fn extract_error_reason(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("reason")?
        .as_str()
        .map(String::from)
}

/// Parses `hits.total`, which the store reports either as a bare integer or
/// as `{value, relation}`.
fn parse_total(total: Option<&serde_json::Value>) -> Option<u64> {
    match total? {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::Object(map) => map.get("value")?.as_u64(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    hits: RawHits,
}

#[derive(Debug, Default, Deserialize)]
struct RawHits {
    total: Option<serde_json::Value>,
    #[serde(default)]
    hits: Vec<FilterHit>,
}
