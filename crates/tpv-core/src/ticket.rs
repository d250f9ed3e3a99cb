//! # Ticket Snapshots
//!
//! A ticket is a read-only receipt derived from a table's ledger state at
//! the moment it is generated. It is never persisted and never cached:
//! generate another one and you get the ledger as it is *now*.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Table 1: 2× Café, 1 payment of 1.00€                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  generate(&data, 1)                                                     │
//! │       │                                                                 │
//! │       ├── table missing or order empty ──► None ("nothing to print")   │
//! │       │                                                                 │
//! │       └── Some(Ticket)                                                  │
//! │             items: cloned order lines (frozen)                          │
//! │             total / paid / remaining: computed now                      │
//! │             date: now                                                   │
//! │                                                                         │
//! │  The ticket owns its data - later mutations of the table do not        │
//! │  reach into an already-generated ticket.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::PosData;
use crate::money::Money;
use crate::types::{OrderLine, TableId};

// =============================================================================
// Ticket
// =============================================================================

/// An immutable receipt snapshot for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    /// The table this receipt belongs to.
    pub table_id: TableId,

    /// The order lines as they stood at generation time.
    pub items: Vec<OrderLine>,

    /// Order total at generation time.
    pub total: Money,

    /// Sum of payments at generation time.
    pub paid: Money,

    /// Balance still owed at generation time.
    pub remaining: Money,

    /// When the ticket was generated.
    pub date: DateTime<Utc>,
}

/// Generates a ticket for a table.
///
/// Returns `None` when the table is missing or its order is empty - that
/// is "nothing to print", not an error.
pub fn generate(data: &PosData, table_id: TableId) -> Option<Ticket> {
    let table = data.table(table_id)?;
    if table.order.is_empty() {
        return None;
    }

    let totals = table.totals();
    Some(Ticket {
        table_id,
        items: table.order.clone(),
        total: totals.total,
        paid: totals.paid,
        remaining: totals.remaining,
        date: Utc::now(),
    })
}

/// Plain-text receipt rendering, one order line per row followed by the
/// three reconciliation amounts.
impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ticket - Table {}", self.table_id)?;
        writeln!(f, "{}", self.date.format("%Y-%m-%d %H:%M"))?;
        writeln!(f)?;
        for item in &self.items {
            writeln!(
                f,
                "{} x{}: {}",
                item.name,
                item.quantity,
                item.line_total()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {}", self.total)?;
        writeln!(f, "Paid: {}", self.paid)?;
        write!(f, "Remaining: {}", self.remaining)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
