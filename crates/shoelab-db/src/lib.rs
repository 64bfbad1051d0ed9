//! # shoelab-db: Database Layer for Shoe Lab
//!
//! SQLite storage for saved shoe configurations, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shoe Lab Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /api/shoes)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shoelab-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  (shoe.rs)    │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ ShoeRepository│    │ 001_create_  │  │   │
//! │  │   │               │    │               │    │   shoes.sql  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (./shoelab.db by default)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shoelab_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./shoelab.db")).await?;
//! db.shoes().seed_if_empty().await?;
//! let shoes = db.shoes().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, TableStatus};
pub use repository::shoe::{demo_shoe, ShoeRepository};
