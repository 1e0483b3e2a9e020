//! Guardian API Server
//!
//! Run with: cargo run --bin guardian-api
//!
//! # Configuration
//!
//! Read from `$CONFIG_DIR/guardian/config.toml` or `./guardian.toml`, or the
//! path in `GUARDIAN_CONFIG`. Environment variables override the file:
//! - `GUARDIAN_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `GUARDIAN_API_PORT`: Port to listen on (default: 8086)
//! - `GUARDIAN_DATA_DIR`: Data directory
//! - `GUARDIAN_STORE_BACKEND`: file, sqlite or memory
//! - `RUST_LOG`: Log filter (default: guardian=info,tower_http=debug)

use anyhow::Context;
use guardian::api::{serve, AppState};
use guardian::config::Config;
use guardian::shell::Shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("GUARDIAN_CONFIG") {
        Ok(path) => Config::load_with_env(std::path::Path::new(&path))
            .with_context(|| format!("loading config from {}", path))?,
        Err(_) => Config::load_default(),
    };

    guardian::logging::init(&config.logging, &["tower_http=debug"]);

    tracing::info!("Starting Guardian API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.store.data_dir);

    let shell = Shell::from_config(&config).context("opening local store")?;
    let state = AppState::new(&shell).context("building page state")?;

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Guardian API server stopped");
    Ok(())
}
