//! # Domain Types
//!
//! Core domain types used throughout tpv.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    OrderLine    │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  product_id     │   │  amount         │       │
//! │  │  name           │   │  name (frozen)  │   │  date           │       │
//! │  │  price          │   │  price (frozen) │   │                 │       │
//! │  │  category       │   │  quantity       │   │  append-only    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │    Table: id + order lines + payments                       │       │
//! │  │    occupied is DERIVED (order non-empty), never stored      │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An `OrderLine` freezes the product's name and price at the moment it is
//! added. Editing or deleting the product later never rewrites history:
//! open orders and printed tickets keep showing what the customer actually
//! ordered at the price of that moment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Product identifier: small monotonic integer, assigned `max + 1`.
pub type ProductId = i64;

/// Table identifier: small monotonic integer, assigned `max + 1`.
pub type TableId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// ## Invariant
/// `category` references an existing category at all times. The catalog
/// operations enforce this: products cannot be created against an unknown
/// category, renames cascade here, and deleting a category deletes its
/// products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (monotonic, never reused while present).
    pub id: ProductId,

    /// Display name shown on buttons and receipts.
    pub name: String,

    /// Unit price. Zero is allowed (free items).
    pub price: Money,

    /// Name of the category this product belongs to.
    pub category: String,
}

// =============================================================================
// Order Line
// =============================================================================

/// A line in a table's open order.
///
/// Uses the snapshot pattern: name and price are frozen copies of the
/// product at the moment it was first added. The line survives even if the
/// product is later edited or deleted from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Id of the product this line snapshotted.
    ///
    /// The wire name is `id` - historical documents spread the whole
    /// product object into the line.
    #[serde(rename = "id")]
    pub product_id: ProductId,

    /// Product name at the time it was added (frozen).
    pub name: String,

    /// Unit price at the time it was added (frozen).
    pub price: Money,

    /// Quantity ordered, always >= 1.
    ///
    /// Older documents omit the field for single items; default to 1.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl OrderLine {
    /// Creates a new line from a product, freezing its name and price.
    pub fn snapshot(product: &Product) -> Self {
        OrderLine {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A partial payment against a table's order.
///
/// Payments are append-only: nothing ever mutates or removes a payment
/// except a full table clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Amount paid. Always positive; the ledger rejects anything else.
    pub amount: Money,

    /// When the payment was taken (RFC 3339 on the wire).
    pub date: DateTime<Utc>,
}

impl Payment {
    /// Creates a payment timestamped now.
    pub fn new(amount: Money) -> Self {
        Payment {
            amount,
            date: Utc::now(),
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// A table with its open order and the payments taken against it.
///
/// ## Occupied Is Derived
/// Earlier revisions stored an `occupied` flag next to the order and only
/// flipped it on specific code paths, so it could drift from reality (an
/// order emptied by a product deletion kept reading "occupied"). Here the
/// flag is computed from the order itself and cannot drift. The wire format
/// still carries `occupied: bool` for compatibility: it is recomputed on
/// serialization and ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TableWire", into = "TableWire")]
pub struct Table {
    /// Unique identifier (monotonic, never reused while present).
    pub id: TableId,

    /// Open order lines, in the order they were first added.
    pub order: Vec<OrderLine>,

    /// Partial payments, in the order they were taken. Append-only.
    pub payments: Vec<Payment>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(id: TableId) -> Self {
        Table {
            id,
            order: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Whether the table currently has an open order.
    #[inline]
    pub fn occupied(&self) -> bool {
        !self.order.is_empty()
    }

    /// Sum of all line totals. Recomputed on every call, never cached:
    /// order lines and payments can change between reads.
    pub fn total(&self) -> Money {
        self.order.iter().map(OrderLine::line_total).sum()
    }

    /// Sum of all payments. Recomputed on every call.
    pub fn paid(&self) -> Money {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Remaining balance: total minus paid.
    pub fn remaining(&self) -> Money {
        self.total() - self.paid()
    }

    /// All three derived amounts in one read.
    pub fn totals(&self) -> TableTotals {
        let total = self.total();
        let paid = self.paid();
        TableTotals {
            total,
            paid,
            remaining: total - paid,
        }
    }

    /// Finds the order line for a product, if the product is on the order.
    pub fn line_mut(&mut self, product_id: ProductId) -> Option<&mut OrderLine> {
        self.order.iter_mut().find(|l| l.product_id == product_id)
    }

    /// Resets the table: empty order, empty payments. Irreversible.
    pub fn clear(&mut self) {
        self.order.clear();
        self.payments.clear();
    }
}

/// Wire representation of a table.
///
/// Exists so `occupied` can live on the wire without living in the model,
/// and so documents that predate the `payments` field load with an empty
/// payment list instead of branching at every read site.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableWire {
    id: TableId,
    #[serde(default)]
    occupied: bool,
    #[serde(default)]
    order: Vec<OrderLine>,
    #[serde(default)]
    payments: Vec<Payment>,
}

impl From<TableWire> for Table {
    fn from(wire: TableWire) -> Self {
        // The stored flag is dropped; occupied() derives it from the order
        Table {
            id: wire.id,
            order: wire.order,
            payments: wire.payments,
        }
    }
}

impl From<Table> for TableWire {
    fn from(table: Table) -> Self {
        TableWire {
            id: table.id,
            occupied: table.occupied(),
            order: table.order,
            payments: table.payments,
        }
    }
}

// =============================================================================
// Table Totals
// =============================================================================

/// Derived amounts for a table, computed at read time.
///
/// ## Invariant
/// `remaining == total - paid` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableTotals {
    pub total: Money,
    pub paid: Money,
    pub remaining: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe() -> Product {
        Product {
            id: 1,
            name: "Café".to_string(),
            price: Money::from_cents(150),
            category: "Bebidas".to_string(),
        }
    }

    #[test]
    fn test_order_line_snapshot_freezes_product() {
        let mut product = cafe();
        let line = OrderLine::snapshot(&product);

        product.name = "Café con leche".to_string();
        product.price = Money::from_cents(200);

        assert_eq!(line.name, "Café");
        assert_eq!(line.price, Money::from_cents(150));
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_line_total() {
        let mut line = OrderLine::snapshot(&cafe());
        line.quantity = 3;
        assert_eq!(line.line_total(), Money::from_cents(450));
    }

    #[test]
    fn test_totals_identity() {
        let mut table = Table::new(1);
        let mut line = OrderLine::snapshot(&cafe());
        line.quantity = 2;
        table.order.push(line);
        table.payments.push(Payment::new(Money::from_cents(100)));

        let totals = table.totals();
        assert_eq!(totals.total, Money::from_cents(300));
        assert_eq!(totals.paid, Money::from_cents(100));
        assert_eq!(totals.remaining, totals.total - totals.paid);
    }

    #[test]
    fn test_occupied_is_derived_from_order() {
        let mut table = Table::new(1);
        assert!(!table.occupied());

        table.order.push(OrderLine::snapshot(&cafe()));
        assert!(table.occupied());

        table.order.clear();
        assert!(!table.occupied());
    }

    #[test]
    fn test_table_wire_emits_computed_occupied() {
        let mut table = Table::new(1);
        table.order.push(OrderLine::snapshot(&cafe()));

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["occupied"], serde_json::json!(true));
        assert_eq!(json["order"][0]["id"], serde_json::json!(1));
    }

    #[test]
    fn test_table_wire_ignores_stored_occupied() {
        // A stale flag on an empty table must not survive the load
        let table: Table = serde_json::from_str(
            r#"{"id": 4, "occupied": true, "order": [], "payments": []}"#,
        )
        .unwrap();
        assert!(!table.occupied());
    }

    #[test]
    fn test_table_defaults_missing_payments() {
        // Documents from before partial payments existed
        let table: Table =
            serde_json::from_str(r#"{"id": 2, "occupied": false, "order": []}"#).unwrap();
        assert!(table.payments.is_empty());
        assert_eq!(table.paid(), Money::zero());
    }

    #[test]
    fn test_order_line_defaults_missing_quantity() {
        // Single items predate the quantity field
        let line: OrderLine =
            serde_json::from_str(r#"{"id": 1, "name": "Café", "price": 1.5}"#).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.line_total(), Money::from_cents(150));
    }

    #[test]
    fn test_order_line_tolerates_extra_fields() {
        // The original front-end spread whole product objects into lines,
        // so a category key may be present; it is ignored
        let line: OrderLine = serde_json::from_str(
            r#"{"id": 1, "name": "Café", "price": 1.5, "category": "Bebidas", "quantity": 2}"#,
        )
        .unwrap();
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_clear_resets_order_and_payments() {
        let mut table = Table::new(1);
        table.order.push(OrderLine::snapshot(&cafe()));
        table.payments.push(Payment::new(Money::from_cents(150)));

        table.clear();

        assert!(table.order.is_empty());
        assert!(table.payments.is_empty());
        assert!(!table.occupied());
        assert_eq!(table.totals().remaining, Money::zero());
    }
}
