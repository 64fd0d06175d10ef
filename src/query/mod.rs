//! Query model for scry.
//!
//! Defines the classified query, the normalized result shape shared by both
//! dialects, and the typed values stored in result rows. Raw values are kept
//! here untouched; stringification and truncation happen at render time in
//! the column formatter.

pub mod filter;
pub mod pagination;
pub mod pipeline;
pub mod router;

pub use pagination::{Cursor, FullLoadCursor, OffsetCursor, PageState, PaginationController};
pub use router::Dialect;

use std::collections::HashMap;
use std::fmt;

/// A classified query. Immutable once classified; a new `Query` is created on
/// every submission and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The raw query text as typed by the operator.
    pub raw_text: String,
    /// The dialect the router assigned to this text.
    pub dialect: Dialect,
}

impl Query {
    /// Classifies `raw_text` and builds a query.
    ///
    /// Fails with `EmptyQuery` on blank input; no request is issued in that
    /// case.
    pub fn classify(raw_text: &str) -> crate::error::Result<Self> {
        let dialect = router::classify(raw_text)?;
        Ok(Self {
            raw_text: raw_text.trim().to_string(),
            dialect,
        })
    }
}

/// A row of a result set: column name to raw value.
pub type Row = HashMap<String, Value>;

/// The normalized result of executing a query in either dialect.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column names in first-seen order.
    pub columns: Vec<String>,
    /// Result rows for the current page (filter dialect) or the entire
    /// result set (pipeline dialect).
    pub rows: Vec<Row>,
    /// The store's reported total, when it reports one.
    pub total_hint: Option<u64>,
    /// Whether more rows exist beyond this result.
    pub has_more: bool,
}

impl QueryResult {
    /// Creates a new empty query result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single value from a store response.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Null or absent field.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text value.
    String(String),

    /// Nested object or array, kept as raw JSON.
    Json(serde_json::Value),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts the value to an untruncated display string.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Json(v) => v.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}
