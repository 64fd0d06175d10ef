//! Query dialect classification.
//!
//! Routes a raw input string to the filter dialect (KQL, executed through the
//! search API) or the pipeline dialect (ES|QL, executed through the query
//! API). Classification is a structural test on the leading token, not a
//! parse; the store itself rejects text that is syntactically invalid for
//! the chosen dialect.

use crate::error::{Result, ScryError};

/// The two query dialects scry dispatches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Flat boolean/field-comparison query with server-side paging.
    Filter,
    /// Multi-stage piped query returning a complete result set per request.
    Pipeline,
}

impl Dialect {
    /// Returns the dialect name for display purposes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filter => "KQL",
            Self::Pipeline => "ES|QL",
        }
    }
}

/// Source-selection keywords that open a pipeline query.
const PIPELINE_KEYWORDS: &[&str] = &["FROM", "ROW", "SHOW"];

/// Classifies a raw query string into a dialect.
///
/// A query whose first token is a pipeline source keyword is pipeline
/// dialect; the query API accepts single-stage queries, so no `|` is
/// required. Everything else is filter dialect, including strings that
/// contain `|` inside quoted values. Fails with `EmptyQuery` on blank input.
pub fn classify(raw_text: &str) -> Result<Dialect> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return Err(ScryError::EmptyQuery);
    }

    let first_token = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();

    if PIPELINE_KEYWORDS.contains(&first_token.as_str()) {
        Ok(Dialect::Pipeline)
    } else {
        Ok(Dialect::Filter)
    }
}
