//! TrainHub server: training-data intake for inspection projects
//!
//! Main entry point: loads configuration, sets up logging and runs the
//! HTTP server until a shutdown signal arrives.

use tracing_subscriber::{EnvFilter, fmt};

use trainhub_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let env = std::env::var("TRAINHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config_dir = std::env::var("TRAINHUB_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let config = match AppConfig::load_from_dir(&config_dir, &env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %env,
        config_dir = %config_dir,
        "Starting TrainHub"
    );

    if let Err(e) = trainhub_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
