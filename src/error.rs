//! Error types for scry.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for scry operations.
#[derive(Error, Debug)]
pub enum ScryError {
    /// Transport errors (host unreachable, auth failed, timeout, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Query errors (the store rejected the filter or pipeline text).
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The submitted query was empty; no request is issued.
    #[error("Empty query")]
    EmptyQuery,

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScryError {
    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::EmptyQuery => "Empty Query",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using ScryError.
pub type Result<T> = std::result::Result<T, ScryError>;
