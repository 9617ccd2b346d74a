//! Lesson Planner: lesson plans over HTTP.
//!
//! This is the application entry point. It parses arguments, loads
//! configuration from TOML, initializes tracing, chooses mock or live
//! generation, builds the Axum router and starts the HTTP server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lesson_planner::config::{AppConfig, API_KEY_ENV, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use lesson_planner::http::start_server;
use lesson_planner::plan::GenerationMode;
use lesson_planner::upstream::OpenAiClient;
use lesson_planner::{create_router, AppState};

/// Lesson Planner: generate classroom lesson plans over HTTP
#[derive(Parser, Debug)]
#[command(name = "lesson-planner", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "lesson_planner=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Serve sample plans even if an API key is configured
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // An explicit path must exist; the default path is optional
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    config.apply_env_api_key(std::env::var(API_KEY_ENV).ok());

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(config = ?config, "Loaded configuration");

    let mode = match config.upstream.api_key() {
        Some(key) if !args.mock => {
            let client = OpenAiClient::new(&config.upstream, key)?;
            tracing::info!(
                model = %config.upstream.model,
                url = %config.upstream.completions_url(),
                timeout_secs = ?config.upstream.timeout_seconds,
                "Live mode: plans come from the completion API"
            );
            GenerationMode::Live(Arc::new(client))
        }
        _ => {
            tracing::info!("Mock mode: no API key configured or --mock given, serving sample plans");
            GenerationMode::Mock
        }
    };

    let app = create_router(AppState::new(mode));

    start_server(app, &config.http).await?;

    Ok(())
}
