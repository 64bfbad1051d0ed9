//! # shoelab-server: REST API for Shoe Lab
//!
//! Serves the option catalog, live quotes and CRUD over saved shoes.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Server Startup                                       │
//! │                                                                         │
//! │  1. init_tracing()          RUST_LOG or "info,shoelab=debug,sqlx=warn" │
//! │  2. ServerConfig::load()    defaults → shoelab.toml → env              │
//! │  3. Database::new()         pool + migrations (creates shoes table)    │
//! │  4. seed_if_empty()         demo shoe on a fresh database              │
//! │  5. bind_with_retry()       port, port+1, ... up to port_retries       │
//! │  6. axum::serve()           until Ctrl+C / SIGTERM                     │
//! │  7. db.close()                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use shoelab_db::{Database, DbConfig};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers::{catalog, health, quote, shoes};

// =============================================================================
// State
// =============================================================================

/// Shared handler state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Builds the application router with tracing and CORS layers.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/debug/db", get(health::debug_db))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/quote", post(quote::quote))
        .route("/api/shoes", get(shoes::list_shoes).post(shoes::create_shoe))
        .route(
            "/api/shoes/{id}",
            get(shoes::get_shoe)
                .patch(shoes::update_shoe)
                .delete(shoes::delete_shoe),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Any origin when `origins` is empty, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Installs the global tracing subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shoelab=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Binds `host:port`, moving to the next port while the current one is taken.
///
/// Tries at most `retries` ports after the first. Any error other than
/// address-in-use is returned immediately.
pub async fn bind_with_retry(host: &str, port: u16, retries: u16) -> io::Result<TcpListener> {
    let mut port = port;
    let mut remaining = retries;

    loop {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(err)
                if err.kind() == io::ErrorKind::AddrInUse && remaining > 0 && port < u16::MAX =>
            {
                warn!(port, next = port + 1, "Port in use, trying next");
                port += 1;
                remaining -= 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Runs the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    if config.seed_on_empty {
        db.shoes().seed_if_empty().await?;
    }

    let listener = bind_with_retry(&config.bind_addr, config.port, config.port_retries).await?;
    let addr = listener.local_addr()?;
    info!(%addr, enforce_rules = config.enforce_rules, "Server listening");

    let app = build_router(AppState::new(db.clone(), config));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(%err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
