//! # shoelab-core: Pure Business Logic for Shoe Lab
//!
//! Option catalog, pricing and configuration rules for the shoe
//! configurator, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shoe Lab Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser)                           │   │
//! │  │    Pick options ──► Live price ──► Warnings ──► Save            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  │    /api/catalog, /api/quote, /api/shoes CRUD                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shoelab-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  pricing  │  │ validation│  │   │
//! │  │   │ShoeConfig │  │ 7 option  │  │  totals   │  │ rule table│  │   │
//! │  │   │   Shoe    │  │ families  │  │  format   │  │  explain  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shoelab-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Configuration and record types (ShoeConfig, Shoe, NewShoe)
//! - [`catalog`] - Static option tables and lookups
//! - [`pricing`] - Total price and currency formatting
//! - [`validation`] - Business rules over a configuration
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shoelab_core::{compute_total, format_default, is_submittable, validate, ShoeConfig};
//!
//! let config = ShoeConfig {
//!     shoe_name: Some("X".to_string()),
//!     size_id: Some(9),
//!     brand_id: Some(1),
//!     type_id: Some(10),
//!     color_id: Some(20),
//!     cushion_id: Some(32),
//!     cushion_color_id: Some(41),
//!     lace_color_id: Some(51),
//! };
//!
//! assert_eq!(format_default(compute_total(Some(&config))), "$158.00");
//! assert!(is_submittable(&validate(Some(&config))));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{snapshot, CatalogSnapshot, OptionFamily, OptionRecord, Swatch};
pub use error::{CoreError, CoreResult, FormatError, ValidationError};
pub use pricing::{compute_total, format_default, format_price, try_format_price, BASE_PRICE};
pub use types::*;
pub use validation::{explain, is_submittable, validate, Severity, Violation, ViolationCode};
