//! # tpv-core: Pure Business Logic for the tpv Point of Sale
//!
//! This crate is the **heart** of tpv. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tpv Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     View Layer (not here)                       │   │
//! │  │    Category list ──► Product grid ──► Table board ──► Ticket   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tpv-store (DataStore facade)                     │   │
//! │  │    load-or-seed, save, import/export, command wrappers          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ tpv-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │  ledger   │  │   │
//! │  │   │  Product  │  │   Money   │  │  CRUD +   │  │ orders +  │  │   │
//! │  │   │   Table   │  │  (cents)  │  │ cascades  │  │ payments  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO RENDERING • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, OrderLine, Payment, Table)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`data`] - The whole object graph (`PosData`) plus the seed catalog
//! - [`catalog`] - Category and product operations with cascading deletes
//! - [`ledger`] - Per-table orders, partial payments, totals, selection
//! - [`ticket`] - Read-only receipt snapshots
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic over its inputs
//! 2. **No I/O**: Persistence and rendering are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are cents (i64) internally
//! 4. **Explicit Errors**: Validation failures are typed, never strings
//! 5. **Silent NotFound**: A lookup miss is a no-op reported through the
//!    return value, not an error - the store stays in its prior valid state
//!
//! ## Example Usage
//!
//! ```rust
//! use tpv_core::{Catalog, Ledger, Money, PosData};
//!
//! let mut data = PosData::seed();
//! let mut selected = None;
//!
//! let mut ledger = Ledger::new(&mut data, &mut selected);
//! ledger.select_table(1);
//! ledger.add_item(Some(1), 1).unwrap(); // one Café
//! ledger.add_item(Some(1), 1).unwrap(); // same line, quantity 2
//!
//! let totals = ledger.totals(1).unwrap();
//! assert_eq!(totals.total, Money::from_cents(300));
//! assert_eq!(totals.remaining, totals.total - totals.paid);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod data;
pub mod error;
pub mod ledger;
pub mod money;
pub mod ticket;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tpv_core::Money` instead of
// `use tpv_core::money::Money`

pub use catalog::Catalog;
pub use data::PosData;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{Ledger, PaymentOutcome};
pub use money::Money;
pub use ticket::Ticket;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of tables created by the seed catalog.
///
/// ## Why a constant?
/// A fresh store opens with this many empty tables, numbered 1..=8.
/// More tables can always be added at runtime (`Ledger::add_table`).
pub const SEED_TABLE_COUNT: i64 = 8;

/// Maximum length of a category name.
///
/// ## Business Reason
/// Category names are rendered as buttons; anything longer than this is a
/// data-entry mistake, not a real category.
pub const MAX_CATEGORY_NAME_LEN: usize = 60;

/// Maximum length of a product name.
///
/// ## Business Reason
/// Keeps order lines and receipts printable. Same ceiling for edits.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
