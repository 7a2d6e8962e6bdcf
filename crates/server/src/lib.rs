//! Lodge Server Library
//!
//! PIN-gated code lists for a free and a premium tier, plus the premium
//! real-time chat, all stored as flat JSON arrays on disk.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod store;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{AppState, ServerConfig};
pub use error::{Error, Result};
pub use router::router;

/// Install the global fmt subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        // Already set, ignore
    }
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing();

    info!("=== Lodge Server ===");

    config.ensure_dirs().await?;
    info!("Data directory: {:?}", config.data_dir);
    info!("Static files: {:?}", config.public_dir);

    let state = AppState::new(&config);
    let app = router(state, &config.public_dir);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
