//! Command-line argument parsing for scry.
//!
//! CLI arguments override the config file, which overrides environment
//! variables.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// A terminal search client for Elasticsearch.
#[derive(Parser, Debug)]
#[command(name = "scry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Store URL (e.g. https://localhost:9200)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Index pattern for filter-dialect searches
    #[arg(short, long, value_name = "PATTERN")]
    pub index: Option<String>,

    /// Page size for results
    #[arg(short, long, value_name = "ROWS")]
    pub size: Option<u64>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Check connectivity and exit without starting the UI
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Applies CLI overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.elasticsearch.url = url.clone();
        }
        if let Some(index) = &self.index {
            config.query.default_index = index.clone();
        }
        if let Some(size) = self.size {
            config.query.default_size = size;
        }
        if self.insecure {
            config.elasticsearch.verify_certs = false;
        }
    }
}
