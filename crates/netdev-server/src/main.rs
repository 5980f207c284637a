//! Netdev Server - Main entry point

use anyhow::Result;
use netdev_common::logging::{init_logging, LogConfig};
use std::sync::Arc;
use tracing::{info, warn};

use netdev_server::{
    api,
    config::{Config, StorageBackend},
    db,
    store::{MemoryDeviceStore, PgDeviceStore, SharedStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("netdev-server")
        .filter_directives("netdev_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting netdev server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    if config.auth.api_token.is_none() {
        warn!("No auth.api_token configured - the API is open to every caller");
    }

    let store: SharedStore = match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = db::create_pool(&config.database).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgDeviceStore::new(pool))
        },
        StorageBackend::Memory => {
            warn!("Using the in-memory store - data is lost on shutdown");
            Arc::new(MemoryDeviceStore::new())
        },
    };

    api::serve(store, &config).await
}
