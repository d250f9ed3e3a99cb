//! # Validation Module
//!
//! Input validation rules shared by the catalog and ledger operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View layer (out of scope)                                    │
//! │  ├── Basic format checks before calling in                             │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Runs before ANY mutation                                          │
//! │  └── A failure leaves the store exactly as it was                      │
//! │                                                                         │
//! │  There is no layer 3: the persisted document has no schema engine,     │
//! │  so these checks are the integrity enforcement.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tpv_core::validation::{validate_product_name, validate_price};
//! use tpv_core::Money;
//!
//! let name = validate_product_name("  Café  ").unwrap();
//! assert_eq!(name, "Café"); // trimmed
//! validate_price(Money::from_cents(150)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CATEGORY_NAME_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 60 characters
///
/// ## Returns
/// The trimmed name; callers store the trimmed form.
pub fn validate_category_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "category name" });
    }

    if name.len() > MAX_CATEGORY_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "category name",
            max: MAX_CATEGORY_NAME_LEN,
        });
    }

    Ok(name)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "product name" });
    }

    if name.len() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product name",
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name)
}

// =============================================================================
// Money Validators
// =============================================================================

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative { field: "price" });
    }

    Ok(())
}

/// Validates a partial payment amount against the remaining balance.
///
/// ## Rules
/// - Must be strictly positive
/// - Must not exceed `remaining`, computed at call time
///
/// ## Why The Bound Matters
/// `paid` exceeding `total` would make `remaining` negative; rejecting the
/// overshoot here is what keeps that invariant without ever storing
/// derived amounts.
pub fn validate_payment_amount(amount: Money, remaining: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive { field: "payment amount" });
    }

    if amount > remaining {
        return Err(ValidationError::ExceedsRemaining { amount, remaining });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
