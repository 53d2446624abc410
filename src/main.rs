//! Airport Search - REST API over aviation reference data

use airport_search::{api, core, db};

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (handles CLI args, env vars, and config file)
    let config = match core::config::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print error to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _logger = match core::Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!("Starting Airport Search v{}", airport_search::VERSION);
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Server configuration"
    );

    info!("Opening database...");
    let db = Arc::new(db::DatabaseManager::new(&config.database)?);
    info!(
        store = ?db.target(),
        pool_size = db.pool_size(),
        "Database ready"
    );

    let server = api::ApiServer::new(&config, db)?;

    info!(
        url = %format!("http://{}:{}", config.server.host, config.server.port),
        "Server ready - starting to serve requests"
    );

    // Blocks until a shutdown signal arrives
    server.serve().await?;

    Ok(())
}
