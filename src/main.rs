//! FileStash Server: personal file storage over HTTP.
//!
//! Main entry point that loads configuration, sets up logging, and starts
//! the server.

use tracing_subscriber::{EnvFilter, fmt};

use filestash_core::config::AppConfig;

#[tokio::main]
async fn main() {
    // ── Step 1: Configuration ────────────────────────────────────
    let env = std::env::var("FILESTASH_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // ── Step 2: Logging ──────────────────────────────────────────
    init_logging(&config);
    tracing::info!(env = %env, "Starting FileStash v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 3: Serve ────────────────────────────────────────────
    if let Err(e) = filestash_api::run_server(config).await {
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
