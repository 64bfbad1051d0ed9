//! # Reset Tool
//!
//! Drops, recreates and seeds the `shoes` table.
//!
//! ## Usage
//! ```bash
//! # Reset ./shoelab.db (or $SHOELAB_DB_PATH)
//! cargo run -p shoelab-db --bin reset
//!
//! # Specify database path
//! cargo run -p shoelab-db --bin reset -- --db ./data/shoelab.db
//! ```
//!
//! Every saved shoe is deleted. The table comes back holding only the demo
//! row, "My New Daily Runners".

use std::env;

use shoelab_db::migrations::migration_status;
use shoelab_db::{Database, DbConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_PATH: &str = "./shoelab.db";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("SHOELAB_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shoe Lab table reset");
                println!();
                println!("Usage: reset [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $SHOELAB_DB_PATH or {})", DEFAULT_DB_PATH);
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                error!(argument = %other, "Unknown argument, see --help");
                return Err(format!("unknown argument: {}", other).into());
            }
        }
        i += 1;
    }

    info!(path = %db_path, "Resetting shoes table");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migration_status(db.pool()).await?;
    info!(total, applied, "Schema ready");

    let before = db.shoes().count().await?;
    info!(rows = before, "Existing shoes will be removed");

    let seeded = db.shoes().reset().await?;
    info!(id = seeded.id, name = %seeded.shoe_name, "Demo shoe seeded");

    db.close().await;
    info!("Reset complete");

    Ok(())
}
