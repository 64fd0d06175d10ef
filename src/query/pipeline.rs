//! Pipeline-dialect adapter.
//!
//! Translates raw pipeline text into a single store request and normalizes
//! the complete result set it returns. The dialect has no native paging: the
//! result is fetched once and later page navigation only slides a window
//! over the buffer held client-side.

use super::{QueryResult, Row, Value};
use crate::config::QueryConfig;
use crate::es::{PipelineRequest, PipelineResponse};
use crate::time_range::TimeBounds;

/// Builds requests and normalizes responses for pipeline-dialect queries.
#[derive(Debug, Clone)]
pub struct PipelineAdapter {
    time_field: String,
}

impl PipelineAdapter {
    /// Creates an adapter using the configured query defaults.
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            time_field: config.time_field.clone(),
        }
    }

    /// Translates raw pipeline text into a store request, splicing the time
    /// window into the query as a `WHERE` stage.
    pub fn build_request(&self, raw_text: &str, bounds: Option<TimeBounds>) -> PipelineRequest {
        let query = match bounds {
            Some(bounds) => splice_time_filter(raw_text, &self.time_field, &bounds),
            None => raw_text.to_string(),
        };
        PipelineRequest { query }
    }

    /// Normalizes the complete result set into a `QueryResult`.
    ///
    /// `has_more` is always false here: everything the query will ever
    /// return is already in the buffer, and windowing is display-level.
    pub fn parse_response(&self, response: PipelineResponse) -> QueryResult {
        let columns: Vec<String> = response.columns.into_iter().map(|c| c.name).collect();

        let rows: Vec<Row> = response
            .values
            .into_iter()
            .map(|values| {
                columns
                    .iter()
                    .zip(values)
                    .map(|(name, value)| (name.clone(), Value::from(value)))
                    .collect()
            })
            .collect();

        QueryResult {
            total_hint: Some(rows.len() as u64),
            has_more: false,
            columns,
            rows,
        }
    }
}

/// Splices a time window condition into pipeline text.
///
/// If the query already has a `WHERE` stage the conditions are prepended to
/// it; otherwise a new `WHERE` stage is inserted directly after the source
/// stage.
fn splice_time_filter(query: &str, time_field: &str, bounds: &TimeBounds) -> String {
    let condition = format!(
        "{time_field} >= \"{}\" AND {time_field} <= \"{}\"",
        bounds.start, bounds.end
    );

    if let Some(pos) = find_keyword(query, "WHERE") {
        let insert_at = pos + "WHERE".len();
        format!(
            "{} {condition} AND{}",
            &query[..insert_at],
            &query[insert_at..]
        )
    } else if let Some(pipe) = query.find('|') {
        format!(
            "{} | WHERE {condition} | {}",
            query[..pipe].trim_end(),
            query[pipe + 1..].trim_start()
        )
    } else {
        format!("{} | WHERE {condition}", query.trim_end())
    }
}

/// Finds a standalone keyword (case-insensitive, word-bounded) in the query.
fn find_keyword(query: &str, keyword: &str) -> Option<usize> {
    let upper = query.to_ascii_uppercase();
    let mut search_from = 0;
    while let Some(rel) = upper[search_from..].find(keyword) {
        let pos = search_from + rel;
        let before_ok = pos == 0
            || !upper[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        let after = pos + keyword.len();
        let after_ok = after == upper.len()
            || !upper[after..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if before_ok && after_ok {
            return Some(pos);
        }
        search_from = pos + keyword.len();
    }
    None
}
