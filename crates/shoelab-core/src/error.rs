//! # Error Types
//!
//! Domain-specific error types for shoelab-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shoelab-core errors (this file)                                       │
//! │  ├── CoreError        - Domain failures (missing fields, rejection)    │
//! │  ├── ValidationError  - Malformed input values                         │
//! │  └── FormatError      - Unsupported currency / locale                  │
//! │                                                                         │
//! │  shoelab-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  server errors (apps/server)                                           │
//! │  └── ApiError         - What HTTP clients see (JSON body + status)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rule violations are NOT errors. [`crate::validation::validate`] returns
//! them as data; [`CoreError::Rejected`] only wraps them once a caller has
//! decided a configuration may not be saved.

use thiserror::Error;

use crate::types::ShoeField;
use crate::validation::Violation;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No shoe has this id.
    #[error("Shoe not found: {0}")]
    ShoeNotFound(i64),

    /// A complete record was required but fields were absent or empty.
    ///
    /// Fields are listed in declaration order, by their wire names.
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<ShoeField>),

    /// A partial update carried nothing recognised.
    #[error("No valid fields to update")]
    NoFieldsToUpdate,

    /// The configuration has at least one blocking violation.
    #[error(
        "Configuration rejected: {} blocking violation(s)",
        .violations.iter().filter(|v| v.is_error()).count()
    )]
    Rejected { violations: Vec<Violation> },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn join_fields(fields: &[ShoeField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These cover malformed values (too long, blank) rather than business rules.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Format Error
// =============================================================================

/// Price formatting errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
