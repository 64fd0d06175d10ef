//! Filter-dialect adapter.
//!
//! Translates raw filter text plus an offset cursor into a search request,
//! and normalizes the paged response. This dialect supports true server-side
//! pagination through the offset/limit pair carried by the cursor.

use super::pagination::OffsetCursor;
use super::{QueryResult, Row, Value};
use crate::config::QueryConfig;
use crate::es::{FilterRequest, FilterResponse};
use crate::time_range::TimeBounds;

/// Builds requests and normalizes responses for filter-dialect queries.
#[derive(Debug, Clone)]
pub struct FilterAdapter {
    index_pattern: String,
    time_field: String,
    max_size: u64,
}

impl FilterAdapter {
    /// Creates an adapter using the configured query defaults.
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            index_pattern: config.default_index.clone(),
            time_field: config.time_field.clone(),
            max_size: config.max_size,
        }
    }

    /// Translates raw query text and a cursor into a store request.
    ///
    /// The page size is bounded by the configured maximum.
    pub fn build_request(
        &self,
        raw_text: &str,
        cursor: &OffsetCursor,
        bounds: Option<TimeBounds>,
    ) -> FilterRequest {
        FilterRequest {
            index_pattern: self.index_pattern.clone(),
            expression: raw_text.to_string(),
            offset: cursor.offset,
            limit: cursor.page_size.min(self.max_size),
            time_field: self.time_field.clone(),
            bounds,
        }
    }

    /// Normalizes a store response into a `QueryResult`.
    ///
    /// Columns are collected in first-seen order across the page, with the
    /// document identity fields leading. `has_more` compares the cursor
    /// position against the store's reported total.
    pub fn parse_response(&self, response: FilterResponse, cursor: &OffsetCursor) -> QueryResult {
        let mut columns: Vec<String> = vec!["_id".to_string(), "_index".to_string()];
        let mut rows: Vec<Row> = Vec::with_capacity(response.hits.len());

        for hit in response.hits {
            let mut row = Row::new();
            row.insert("_id".to_string(), Value::String(hit.id));
            row.insert("_index".to_string(), Value::String(hit.index));

            for (field, value) in hit.source {
                if !columns.contains(&field) {
                    columns.push(field.clone());
                }
                row.insert(field, Value::from(value));
            }

            rows.push(row);
        }

        let total_hint = response.total;
        let has_more =
            total_hint.is_some_and(|total| cursor.offset + (rows.len() as u64) < total);

        QueryResult {
            columns,
            rows,
            total_hint,
            has_more,
        }
    }
}
