//! # The Object Graph
//!
//! `PosData` is the whole data model of the point of sale: the category
//! list, the product catalog, and the tables with their orders and
//! payments. There is exactly one instance per running store, it is owned
//! by the persistence layer, and nothing outside it holds references into
//! it - every component receives a borrow explicitly (no ambient singleton).
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DataStore (tpv-store)                                                  │
//! │      │ owns                                                             │
//! │      ▼                                                                  │
//! │  PosData ── categories: Vec<String>                                     │
//! │         ├── products:   Vec<Product>    (category must exist)           │
//! │         └── tables:     Vec<Table>      (order lines are snapshots)     │
//! │                                                                         │
//! │  Catalog<'_> and Ledger<'_> borrow &mut PosData for one operation       │
//! │  and release it; they never stash state of their own.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, ProductId, Table, TableId};
use crate::SEED_TABLE_COUNT;

// =============================================================================
// PosData
// =============================================================================

/// The full in-memory data model: categories, products, tables.
///
/// Serializes directly as the persisted document
/// (`{categories, products, tables}`); there is no separate DTO layer.
/// Missing top-level collections in older documents default to empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PosData {
    /// Category names. A name is its own key: unique, case-sensitive.
    #[serde(default)]
    pub categories: Vec<String>,

    /// The product catalog.
    #[serde(default)]
    pub products: Vec<Product>,

    /// The tables, each with its open order and payments.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl PosData {
    /// Builds the default catalog a fresh store opens with.
    ///
    /// Three categories, three products, eight empty tables numbered 1..=8.
    /// These are the exact values every deployment has always started from.
    pub fn seed() -> Self {
        PosData {
            categories: vec![
                "Bebidas".to_string(),
                "Comidas".to_string(),
                "Postres".to_string(),
            ],
            products: vec![
                Product {
                    id: 1,
                    name: "Café".to_string(),
                    price: Money::from_cents(150),
                    category: "Bebidas".to_string(),
                },
                Product {
                    id: 2,
                    name: "Cerveza".to_string(),
                    price: Money::from_cents(250),
                    category: "Bebidas".to_string(),
                },
                Product {
                    id: 3,
                    name: "Hamburguesa".to_string(),
                    price: Money::from_cents(500),
                    category: "Comidas".to_string(),
                },
            ],
            tables: (1..=SEED_TABLE_COUNT).map(Table::new).collect(),
        }
    }

    // =========================================================================
    // Id Assignment
    // =========================================================================
    // Ids are `max(existing) + 1`, or 1 for an empty collection. Deleting
    // the highest entry makes its id eligible for reuse; order lines keep
    // working because they are snapshots, not references.

    /// Next product id.
    pub fn next_product_id(&self) -> ProductId {
        self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Next table id.
    pub fn next_table_id(&self) -> TableId {
        self.tables.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Whether a category with this exact name exists.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.as_str() == name)
    }

    /// Looks up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by id, mutably.
    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Looks up a table by id.
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Looks up a table by id, mutably.
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
