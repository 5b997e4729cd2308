//! Paintboard HTTP Server
//!
//! Serves one shared drawing document over a JSON API under `/api`.
//! Configuration comes from `PAINTBOARD_*` environment variables and log
//! filtering from `RUST_LOG`.

mod config;
mod error;
mod routes;
mod state;

use config::{ConfigError, ServerConfig};
use paintboard_core::Document;
use state::AppState;
use thiserror::Error;
use tracing::info;

const DEFAULT_LOG_FILTER: &str = "paintboard_server=info,paintboard_core=info,tower_http=info";

#[derive(Debug, Error)]
enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::new(Document::with_config(config.document_config()));
    let app = routes::app(state, &config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Paintboard server listening on {}", addr);
    info!("API endpoint: http://{}/api/shapes", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
