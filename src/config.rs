//! Configuration management for scry.
//!
//! Handles loading configuration from TOML files and environment variables:
//! the store connection under `[elasticsearch]` and query defaults under
//! `[query]`.

use crate::error::{Result, ScryError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Main configuration structure for scry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Store connection settings.
    #[serde(default)]
    pub elasticsearch: EsConfig,

    /// Query defaults.
    #[serde(default)]
    pub query: QueryConfig,
}

/// Store connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsConfig {
    /// Base URL of the store (e.g. `https://localhost:9200`).
    #[serde(default = "default_url")]
    pub url: String,

    /// Basic auth username.
    pub username: Option<String>,

    /// Basic auth password (not recommended to store in config).
    pub password: Option<String>,

    /// Whether to verify TLS certificates.
    #[serde(default = "default_verify_certs")]
    pub verify_certs: bool,

    /// Timeout for filter-dialect searches, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Timeout for pipeline-dialect queries, in seconds. These run the whole
    /// result set in one request and routinely take longer.
    #[serde(default = "default_pipeline_timeout_secs")]
    pub pipeline_timeout_secs: u64,
}

fn default_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_verify_certs() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_pipeline_timeout_secs() -> u64 {
    600
}

impl Default for EsConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: None,
            password: None,
            verify_certs: default_verify_certs(),
            timeout_secs: default_timeout_secs(),
            pipeline_timeout_secs: default_pipeline_timeout_secs(),
        }
    }
}

impl EsConfig {
    /// Validates the configured URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| ScryError::config(format!("Invalid store URL '{}': {e}", self.url)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ScryError::config(format!(
                "Invalid scheme '{}'. Expected 'http' or 'https'",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Applies environment variables (ES_URL, ES_USERNAME, ES_PASSWORD) as
    /// defaults for unset fields.
    pub fn apply_env_defaults(&mut self) {
        if self.url == default_url() {
            if let Ok(url) = std::env::var("ES_URL") {
                self.url = url;
            }
        }
        if self.username.is_none() {
            self.username = std::env::var("ES_USERNAME").ok();
        }
        if self.password.is_none() {
            self.password = std::env::var("ES_PASSWORD").ok();
        }
    }

    /// Returns a display-safe string (no credentials) for UI purposes.
    pub fn display_string(&self) -> String {
        self.url.trim_end_matches('/').to_string()
    }
}

/// Query defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Default index pattern for filter-dialect searches.
    #[serde(default = "default_index")]
    pub default_index: String,

    /// Page size for filter-dialect paging and the pipeline display window.
    #[serde(default = "default_size")]
    pub default_size: u64,

    /// Upper bound on any requested page size.
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Field used for time filtering and default sort.
    #[serde(default = "default_time_field")]
    pub time_field: String,
}

fn default_index() -> String {
    "*".to_string()
}

fn default_size() -> u64 {
    100
}

fn default_max_size() -> u64 {
    10_000
}

fn default_time_field() -> String {
    "@timestamp".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_index: default_index(),
            default_size: default_size(),
            max_size: default_max_size(),
            time_field: default_time_field(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scry")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ScryError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            ScryError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_config() {
        let toml = r#"
[elasticsearch]
url = "https://es.example.com:9200"
username = "reader"
verify_certs = false

[query]
default_index = "logs-*"
default_size = 50
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.elasticsearch.url, "https://es.example.com:9200");
        assert_eq!(config.elasticsearch.username, Some("reader".to_string()));
        assert!(!config.elasticsearch.verify_certs);
        assert_eq!(config.query.default_index, "logs-*");
        assert_eq!(config.query.default_size, 50);
        // Unset fields fall back to defaults
        assert_eq!(config.query.max_size, 10_000);
        assert_eq!(config.query.time_field, "@timestamp");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.elasticsearch.url, "http://localhost:9200");
        assert!(config.elasticsearch.verify_certs);
        assert_eq!(config.elasticsearch.timeout_secs, 300);
        assert_eq!(config.elasticsearch.pipeline_timeout_secs, 600);
        assert_eq!(config.query.default_index, "*");
        assert_eq!(config.query.default_size, 100);
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let es = EsConfig {
            url: "ftp://localhost:9200".to_string(),
            ..Default::default()
        };
        let err = es.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid scheme"));
    }

    #[test]
    fn test_validate_accepts_https() {
        let es = EsConfig {
            url: "https://localhost:9200".to_string(),
            ..Default::default()
        };
        assert!(es.validate().is_ok());
    }

    #[test]
    fn test_display_string_strips_trailing_slash() {
        let es = EsConfig {
            url: "https://es.example.com:9200/".to_string(),
            ..Default::default()
        };
        assert_eq!(es.display_string(), "https://es.example.com:9200");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.query.default_size, 100);
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[elasticsearch\nurl = nope").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }
}
