//! # Table Ledger
//!
//! Per-table order lines and payment records: add items, take partial
//! payments, compute totals, clear tables, track the selected table.
//!
//! ## The Reconciliation Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Total / Paid / Remaining                             │
//! │                                                                         │
//! │  total     = Σ line.price × line.quantity     (recomputed every read)  │
//! │  paid      = Σ payment.amount                 (recomputed every read)  │
//! │  remaining = total - paid                                               │
//! │                                                                         │
//! │  pay_partial(amount)                                                   │
//! │       │                                                                 │
//! │       ├── order empty? ──────────────► NothingToPay                    │
//! │       ├── amount <= 0? ──────────────► MustBePositive                  │
//! │       ├── amount > remaining? ───────► ExceedsRemaining                │
//! │       │                                                                 │
//! │       └── append Payment { amount, now }                               │
//! │             └── remaining hits 0? report "fully paid" (informational:  │
//! │                 the table is NOT cleared, payments stay on record)     │
//! │                                                                         │
//! │  Nothing is ever cached, so paid can never exceed total.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Selection
//! The "currently selected table" is a plain pointer used by the order and
//! ticket views. Selecting does not validate that the table exists;
//! deleting the selected table clears the pointer.

use tracing::debug;

use crate::data::PosData;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderLine, Payment, ProductId, Table, TableId, TableTotals};
use crate::validation::validate_payment_amount;

// =============================================================================
// Payment Outcome
// =============================================================================

/// Result of a successful partial payment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentOutcome {
    /// Balance left after this payment.
    pub remaining: Money,

    /// Whether the table is now fully paid.
    ///
    /// Informational only: nothing is auto-cleared and the order stays
    /// open until someone explicitly clears the table.
    pub fully_paid: bool,
}

// =============================================================================
// Ledger
// =============================================================================

/// Ledger operations over a borrowed object graph plus the table selection.
///
/// ```rust
/// use tpv_core::{Ledger, Money, PosData};
///
/// let mut data = PosData::seed();
/// let mut selected = None;
/// let mut ledger = Ledger::new(&mut data, &mut selected);
///
/// ledger.add_item(Some(1), 1).unwrap();
/// let outcome = ledger.pay_partial(1, Money::from_cents(150)).unwrap();
/// assert!(outcome.fully_paid);
/// ```
#[derive(Debug)]
pub struct Ledger<'a> {
    data: &'a mut PosData,
    selected: &'a mut Option<TableId>,
}

impl<'a> Ledger<'a> {
    /// Wraps the object graph and the selection pointer.
    pub fn new(data: &'a mut PosData, selected: &'a mut Option<TableId>) -> Self {
        Ledger { data, selected }
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Adds a new empty table and returns its id
    /// (`max(existing) + 1`, or 1 when there are none).
    pub fn add_table(&mut self) -> TableId {
        let id = self.data.next_table_id();
        self.data.tables.push(Table::new(id));
        id
    }

    /// Deletes a table. If it was the selected table, the selection is
    /// cleared so the order view stops pointing at a ghost.
    ///
    /// ## Returns
    /// Whether the table existed.
    pub fn delete_table(&mut self, table_id: TableId) -> bool {
        let before = self.data.tables.len();
        self.data.tables.retain(|t| t.id != table_id);

        if self.data.tables.len() == before {
            debug!(table_id, "delete_table: no such table, ignoring");
            return false;
        }

        if *self.selected == Some(table_id) {
            *self.selected = None;
        }
        true
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Selects a table. Pure pointer state: no validation that it exists.
    pub fn select_table(&mut self, table_id: TableId) {
        *self.selected = Some(table_id);
    }

    /// Clears the selection.
    pub fn deselect_table(&mut self) {
        *self.selected = None;
    }

    /// The currently selected table, if any.
    pub fn selected_table(&self) -> Option<TableId> {
        *self.selected
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Adds one unit of a product to a table's order.
    ///
    /// If the product is already on the order its quantity goes up by 1;
    /// otherwise a new line is appended snapshotting the product's current
    /// name and price.
    ///
    /// ## Errors
    /// - `NoTableSelected` when `table_id` is `None`
    ///
    /// ## Returns
    /// `Ok(false)` when the table or product lookup misses (no-op),
    /// `Ok(true)` when the order was updated.
    pub fn add_item(
        &mut self,
        table_id: Option<TableId>,
        product_id: ProductId,
    ) -> CoreResult<bool> {
        let Some(table_id) = table_id else {
            return Err(CoreError::NoTableSelected);
        };

        // Snapshot the product first; the mutable table borrow comes after
        let Some(product) = self.data.product(product_id).cloned() else {
            debug!(product_id, "add_item: unknown product, ignoring");
            return Ok(false);
        };
        let Some(table) = self.data.table_mut(table_id) else {
            debug!(table_id, "add_item: unknown table, ignoring");
            return Ok(false);
        };

        match table.line_mut(product_id) {
            Some(line) => line.quantity += 1,
            None => table.order.push(OrderLine::snapshot(&product)),
        }

        Ok(true)
    }

    /// Derived totals for a table, recomputed at call time.
    ///
    /// `None` when the table does not exist.
    pub fn totals(&self, table_id: TableId) -> Option<TableTotals> {
        self.data.table(table_id).map(Table::totals)
    }

    // =========================================================================
    // Payments
    // =========================================================================

    /// Takes a partial payment against a table.
    ///
    /// ## Errors
    /// - `NothingToPay` when the table is missing or its order is empty
    /// - `MustBePositive` / `ExceedsRemaining` for bad amounts; the bound
    ///   is checked against `remaining` computed right now
    pub fn pay_partial(&mut self, table_id: TableId, amount: Money) -> CoreResult<PaymentOutcome> {
        let Some(table) = self.data.table_mut(table_id) else {
            return Err(CoreError::NothingToPay { table_id });
        };
        if table.order.is_empty() {
            return Err(CoreError::NothingToPay { table_id });
        }

        validate_payment_amount(amount, table.remaining())?;

        table.payments.push(Payment::new(amount));

        let remaining = table.remaining();
        Ok(PaymentOutcome {
            remaining,
            // <= rather than == out of caution; the bound check above
            // keeps remaining from ever going negative
            fully_paid: remaining <= Money::zero(),
        })
    }

    /// Clears a table: empty order, empty payments. Irreversible.
    ///
    /// ## Returns
    /// Whether the table existed.
    pub fn clear_table(&mut self, table_id: TableId) -> bool {
        match self.data.table_mut(table_id) {
            Some(table) => {
                table.clear();
                true
            }
            None => {
                debug!(table_id, "clear_table: no such table, ignoring");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    struct Fixture {
        data: PosData,
        selected: Option<TableId>,
    }

    impl Fixture {
        fn seeded() -> Self {
            Fixture {
                data: PosData::seed(),
                selected: None,
            }
        }

        fn ledger(&mut self) -> Ledger<'_> {
            Ledger::new(&mut self.data, &mut self.selected)
        }
    }

    #[test]
    fn test_add_table_assigns_next_id() {
        let mut fx = Fixture::seeded();
        assert_eq!(fx.ledger().add_table(), 9);
        assert_eq!(fx.ledger().add_table(), 10);

        let table = fx.data.table(9).unwrap();
        assert!(!table.occupied());
        assert!(table.order.is_empty());
        assert!(table.payments.is_empty());
    }

    #[test]
    fn test_delete_table_clears_matching_selection() {
        let mut fx = Fixture::seeded();
        fx.ledger().select_table(3);

        assert!(fx.ledger().delete_table(3));

        assert!(fx.data.table(3).is_none());
        assert_eq!(fx.selected, None);
    }

    #[test]
    fn test_delete_other_table_keeps_selection() {
        let mut fx = Fixture::seeded();
        fx.ledger().select_table(3);

        assert!(fx.ledger().delete_table(5));

        assert_eq!(fx.selected, Some(3));
    }

    #[test]
    fn test_selection_is_unvalidated_pointer_state() {
        let mut fx = Fixture::seeded();

        fx.ledger().select_table(42); // no such table, still fine
        assert_eq!(fx.ledger().selected_table(), Some(42));

        fx.ledger().deselect_table();
        assert_eq!(fx.ledger().selected_table(), None);
    }

    #[test]
    fn test_add_item_requires_a_table() {
        let mut fx = Fixture::seeded();
        let err = fx.ledger().add_item(None, 1).unwrap_err();
        assert!(matches!(err, CoreError::NoTableSelected));
    }

    #[test]
    fn test_add_item_lookup_misses_are_noops() {
        let mut fx = Fixture::seeded();

        assert!(!fx.ledger().add_item(Some(1), 99).unwrap()); // no product
        assert!(!fx.ledger().add_item(Some(99), 1).unwrap()); // no table

        assert_eq!(fx.data, PosData::seed());
    }

    #[test]
    fn test_repeat_add_increments_quantity() {
        let mut fx = Fixture::seeded();

        assert!(fx.ledger().add_item(Some(1), 1).unwrap());
        assert!(fx.ledger().add_item(Some(1), 1).unwrap());

        let table = fx.data.table(1).unwrap();
        assert_eq!(table.order.len(), 1); // one line, not two
        assert_eq!(table.order[0].quantity, 2);
        assert!(table.occupied());
    }

    #[test]
    fn test_add_item_snapshots_current_price() {
        let mut fx = Fixture::seeded();
        fx.ledger().add_item(Some(1), 1).unwrap();

        // Reprice the product afterwards
        fx.data.product_mut(1).unwrap().price = Money::from_cents(999);

        let line = &fx.data.table(1).unwrap().order[0];
        assert_eq!(line.price, Money::from_cents(150));
    }

    #[test]
    fn test_totals_identity_holds() {
        let mut fx = Fixture::seeded();
        fx.ledger().add_item(Some(2), 2).unwrap(); // Cerveza 2.50
        fx.ledger().add_item(Some(2), 3).unwrap(); // Hamburguesa 5.00
        fx.ledger().pay_partial(2, Money::from_cents(300)).unwrap();

        let totals = fx.ledger().totals(2).unwrap();
        assert_eq!(totals.total, Money::from_cents(750));
        assert_eq!(totals.paid, Money::from_cents(300));
        assert_eq!(totals.remaining, totals.total - totals.paid);

        assert!(fx.ledger().totals(99).is_none());
    }

    /// The seed scenario end to end: two Cafés, pay in full, then try to
    /// overpay by a cent.
    #[test]
    fn test_pay_partial_full_scenario() {
        let mut fx = Fixture::seeded();
        fx.ledger().add_item(Some(1), 1).unwrap();
        fx.ledger().add_item(Some(1), 1).unwrap();

        let totals = fx.ledger().totals(1).unwrap();
        assert_eq!(totals.total, Money::from_cents(300));
        assert_eq!(totals.paid, Money::zero());
        assert_eq!(totals.remaining, Money::from_cents(300));

        let outcome = fx.ledger().pay_partial(1, Money::from_cents(300)).unwrap();
        assert!(outcome.fully_paid);
        assert_eq!(outcome.remaining, Money::zero());
        assert_eq!(fx.data.table(1).unwrap().payments.len(), 1);

        // Fully paid, so even one more cent is over the limit
        let err = fx.ledger().pay_partial(1, Money::from_cents(1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::ExceedsRemaining { .. })
        ));
        assert_eq!(fx.data.table(1).unwrap().payments.len(), 1);
    }

    #[test]
    fn test_pay_partial_leaves_table_open() {
        let mut fx = Fixture::seeded();
        fx.ledger().add_item(Some(1), 1).unwrap();
        fx.ledger().pay_partial(1, Money::from_cents(150)).unwrap();

        // Fully paid is a signal, not a state change
        let table = fx.data.table(1).unwrap();
        assert!(table.occupied());
        assert_eq!(table.order.len(), 1);
        assert_eq!(table.payments.len(), 1);
    }

    #[test]
    fn test_pay_partial_never_lets_paid_exceed_total() {
        let mut fx = Fixture::seeded();
        fx.ledger().add_item(Some(1), 2).unwrap(); // Cerveza 2.50

        assert!(fx.ledger().pay_partial(1, Money::from_cents(251)).is_err());
        fx.ledger().pay_partial(1, Money::from_cents(200)).unwrap();
        assert!(fx.ledger().pay_partial(1, Money::from_cents(51)).is_err());

        let outcome = fx.ledger().pay_partial(1, Money::from_cents(50)).unwrap();
        assert!(outcome.fully_paid);

        let totals = fx.ledger().totals(1).unwrap();
        assert!(totals.paid <= totals.total);
        assert!(!totals.remaining.is_negative());
    }

    #[test]
    fn test_pay_partial_rejects_bad_amounts() {
        let mut fx = Fixture::seeded();
        fx.ledger().add_item(Some(1), 1).unwrap();

        assert!(fx.ledger().pay_partial(1, Money::zero()).is_err());
        assert!(fx.ledger().pay_partial(1, Money::from_cents(-100)).is_err());
        assert!(fx.data.table(1).unwrap().payments.is_empty());
    }

    #[test]
    fn test_pay_partial_nothing_to_pay() {
        let mut fx = Fixture::seeded();

        // Empty order
        let err = fx.ledger().pay_partial(1, Money::from_cents(100)).unwrap_err();
        assert!(matches!(err, CoreError::NothingToPay { table_id: 1 }));

        // Missing table
        let err = fx.ledger().pay_partial(99, Money::from_cents(100)).unwrap_err();
        assert!(matches!(err, CoreError::NothingToPay { table_id: 99 }));
    }

    #[test]
    fn test_clear_table_resets_everything() {
        let mut fx = Fixture::seeded();
        fx.ledger().add_item(Some(1), 1).unwrap();
        fx.ledger().pay_partial(1, Money::from_cents(100)).unwrap();

        assert!(fx.ledger().clear_table(1));

        let table = fx.data.table(1).unwrap();
        assert!(table.order.is_empty());
        assert!(table.payments.is_empty());
        assert!(!table.occupied());
        assert_eq!(table.totals().total, Money::zero());

        assert!(!fx.ledger().clear_table(99));
    }
}
