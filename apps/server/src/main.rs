//! # Shoe Lab Server
//!
//! ```bash
//! # Defaults: port 3000, ./shoelab.db
//! cargo run -p shoelab-server
//!
//! # Explicit config file
//! cargo run -p shoelab-server -- --config ./shoelab.toml
//! ```

use std::path::PathBuf;

use shoelab_server::config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    shoelab_server::init_tracing();

    info!("Starting Shoe Lab server...");

    let config_path = std::env::args()
        .skip_while(|arg| arg != "--config")
        .nth(1)
        .map(PathBuf::from);

    let config = ServerConfig::load(config_path)?;
    info!(
        port = config.port,
        db = %config.database_path.display(),
        currency = %config.currency,
        locale = %config.locale,
        "Configuration loaded"
    );

    shoelab_server::run(config).await?;

    info!("Server shutdown complete");
    Ok(())
}
