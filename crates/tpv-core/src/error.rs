//! # Error Types
//!
//! Domain-specific error types for tpv-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tpv-core errors (this file)                                           │
//! │  ├── CoreError        - Ledger/catalog rule violations                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tpv-store errors (separate crate)                                     │
//! │  ├── StoreError       - Persistence failures                           │
//! │  └── FormatError      - Import document failures                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → user-visible message │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (names, amounts, ids)
//! 3. Errors are enum variants, never String
//! 4. A lookup miss is NOT an error: those operations report "nothing
//!    happened" through their return value and leave the store untouched
//! 5. Every error is terminal for the one attempted operation only - no
//!    partial mutation is ever committed

use thiserror::Error;

use crate::money::Money;
use crate::types::TableId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// by the view layer and translated to user-friendly messages; none of them
/// is fatal to the running process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An order operation was attempted with no table selected.
    ///
    /// ## When This Occurs
    /// - `add_item` called before any table has been picked
    #[error("no table selected")]
    NoTableSelected,

    /// A payment was attempted against a table with nothing to pay.
    ///
    /// ## When This Occurs
    /// - The table does not exist
    /// - The table exists but its order is empty
    #[error("table {table_id} has no order to pay")]
    NothingToPay { table_id: TableId },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any mutation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Duplicate value (e.g., a category that already exists).
    /// The match is case-sensitive and exact.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    /// A rename where the new name equals the old one.
    #[error("{field} is unchanged")]
    Unchanged { field: &'static str },

    /// A product references a category that is not in the catalog.
    #[error("unknown category '{name}'")]
    UnknownCategory { name: String },

    /// Value must not be negative (prices; zero is allowed for free items).
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: &'static str },

    /// Value must be strictly positive (payment amounts).
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// A payment larger than the remaining balance of the table.
    ///
    /// ## Why This Is Checked Here
    /// `paid` must never exceed `total`; the bound is recomputed at call
    /// time so the check holds even after earlier partial payments.
    #[error("payment of {amount} exceeds remaining balance of {remaining}")]
    ExceedsRemaining { amount: Money, remaining: Money },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
