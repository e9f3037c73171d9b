//! FarmLive Disease Detection API - Main Entry Point

use api::{init_logging, run_server, ServiceConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== FarmLive Disease Detection API v{} ===", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::load()?;
    info!(
        "Serving {:?} variant, {} model candidate paths",
        config.variant,
        config.model.candidates.len()
    );

    run_server(config).await
}
