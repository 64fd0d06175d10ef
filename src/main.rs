//! scry - A terminal search client for Elasticsearch.

use scry::cli::Cli;
use scry::config::Config;
use scry::error::Result;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // File logging in TUI mode; stderr for one-shot commands.
    if cli.check {
        scry::logging::init_stderr_logging();
    } else {
        scry::logging::init_file_logging();
    }

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Resolve configuration with precedence:
    // 1. CLI arguments (highest)
    // 2. Config file
    // 3. Environment variables
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_overrides(&mut config);
    config.elasticsearch.apply_env_defaults();
    config.elasticsearch.validate()?;

    info!("Connecting to {}", config.elasticsearch.display_string());
    let client = scry::es::connect(&config.elasticsearch).await?;
    info!("Connected successfully");

    if cli.check {
        println!("Connected to {}", config.elasticsearch.display_string());
        return Ok(());
    }

    scry::tui::run(client, &config).await
}
