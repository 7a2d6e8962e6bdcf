//! Server configuration and shared handler state

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{PinPolicy, DEFAULT_FREE_PIN, DEFAULT_PREMIUM_PIN};
use crate::chat::ChatChannel;
use crate::models::Collection;
use crate::store::JsonStore;

/// Configuration for the Lodge server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Port to listen on (all interfaces)
    pub port: u16,
    /// Directory holding the collection files
    pub data_dir: PathBuf,
    /// Static front-end served for unmatched paths
    pub public_dir: PathBuf,
    /// Free tier secret
    pub free_pin: String,
    /// Premium tier secret
    pub premium_pin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: PathBuf::from("."),
            public_dir: PathBuf::from("public"),
            free_pin: DEFAULT_FREE_PIN.to_string(),
            premium_pin: DEFAULT_PREMIUM_PIN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Create config with a custom data directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Collection -> file map handed to the store
    pub fn collection_paths(&self) -> HashMap<Collection, PathBuf> {
        Collection::ALL
            .into_iter()
            .map(|c| (c, self.data_dir.join(c.file_name())))
            .collect()
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Ensure the data directory exists
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub chat: Arc<ChatChannel>,
    pub pins: Arc<PinPolicy>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let store = Arc::new(JsonStore::new(config.collection_paths()));
        Self {
            chat: Arc::new(ChatChannel::new(store.clone())),
            pins: Arc::new(PinPolicy::new(&config.free_pin, &config.premium_pin)),
            store,
        }
    }
}
