//! # Catalog Operations
//!
//! Create, rename and delete categories and products, with the cascades
//! that keep the object graph consistent.
//!
//! ## Cascade Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Cascades                                 │
//! │                                                                         │
//! │  rename_category(old, new)                                             │
//! │       └──► every Product.category == old is rewritten to new           │
//! │                                                                         │
//! │  delete_category(name)                                                 │
//! │       └──► every Product in the category is deleted                    │
//! │            (order lines are NOT touched - they are snapshots)           │
//! │                                                                         │
//! │  delete_product(id)                                                    │
//! │       └──► the matching OrderLine is stripped from EVERY table         │
//! │                                                                         │
//! │  edit_product(id, ...)                                                 │
//! │       └──► no cascade: existing order lines keep the old snapshot      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## NotFound Is a No-op
//! Deleting or editing something that is not there returns `false` (or
//! `Ok(false)`) and changes nothing. Only bad *input* is an error.

use crate::data::PosData;
use crate::error::{CoreResult, ValidationError};
use crate::types::{Product, ProductId};
use crate::validation::{validate_category_name, validate_price, validate_product_name};
use crate::Money;

// =============================================================================
// Catalog
// =============================================================================

/// Catalog operations over a borrowed object graph.
///
/// Borrow one from the store for the duration of a single operation:
///
/// ```rust
/// use tpv_core::{Catalog, Money, PosData};
///
/// let mut data = PosData::seed();
/// let id = Catalog::new(&mut data)
///     .add_product("Tarta", Money::from_cents(350), "Postres")
///     .unwrap();
/// assert_eq!(id, 4);
/// ```
#[derive(Debug)]
pub struct Catalog<'a> {
    data: &'a mut PosData,
}

impl<'a> Catalog<'a> {
    /// Wraps the object graph for catalog operations.
    pub fn new(data: &'a mut PosData) -> Self {
        Catalog { data }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Adds a category.
    ///
    /// ## Errors
    /// - `Required` when the name is empty
    /// - `Duplicate` when the exact name (case-sensitive) already exists
    pub fn add_category(&mut self, name: &str) -> CoreResult<()> {
        let name = validate_category_name(name)?;

        if self.data.has_category(name) {
            return Err(ValidationError::Duplicate {
                field: "category",
                value: name.to_string(),
            }
            .into());
        }

        self.data.categories.push(name.to_string());
        Ok(())
    }

    /// Renames a category and rewrites every product that referenced it.
    ///
    /// ## Errors
    /// - `Required` / `TooLong` when the new name is invalid
    /// - `Unchanged` when the new name equals the old one
    /// - `Duplicate` when the new name collides with another category
    ///
    /// ## Returns
    /// `Ok(false)` when `old` is not a known category (no-op).
    pub fn rename_category(&mut self, old: &str, new: &str) -> CoreResult<bool> {
        let new = validate_category_name(new)?;

        if new == old {
            return Err(ValidationError::Unchanged { field: "category name" }.into());
        }

        if self.data.has_category(new) {
            return Err(ValidationError::Duplicate {
                field: "category",
                value: new.to_string(),
            }
            .into());
        }

        let Some(slot) = self.data.categories.iter_mut().find(|c| c.as_str() == old) else {
            return Ok(false);
        };
        *slot = new.to_string();

        // Cascade: keep the Product.category invariant intact
        for product in &mut self.data.products {
            if product.category == old {
                product.category = new.to_string();
            }
        }

        Ok(true)
    }

    /// Deletes a category and every product in it.
    ///
    /// Tables are untouched: order lines referencing the deleted products
    /// remain as orphaned snapshots, which is exactly what a historical
    /// order should do.
    ///
    /// ## Returns
    /// Whether the category existed.
    pub fn delete_category(&mut self, name: &str) -> bool {
        let before = self.data.categories.len();
        self.data.categories.retain(|c| c.as_str() != name);

        if self.data.categories.len() == before {
            return false;
        }

        self.data.products.retain(|p| p.category != name);
        true
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Adds a product.
    ///
    /// ## Errors
    /// - `Required` / `TooLong` when the name is invalid
    /// - `MustBeNonNegative` when the price is negative
    /// - `UnknownCategory` when the category is not in the catalog
    ///
    /// ## Returns
    /// The assigned id (`max(existing) + 1`, or 1 for an empty catalog).
    pub fn add_product(&mut self, name: &str, price: Money, category: &str) -> CoreResult<ProductId> {
        let name = validate_product_name(name)?;
        validate_price(price)?;
        self.require_category(category)?;

        let id = self.data.next_product_id();
        self.data.products.push(Product {
            id,
            name: name.to_string(),
            price,
            category: category.to_string(),
        });

        Ok(id)
    }

    /// Rewrites a product in place.
    ///
    /// Existing order lines are deliberately NOT updated: they snapshot
    /// the product as it was when added.
    ///
    /// ## Returns
    /// `Ok(false)` when no product has this id (no-op).
    pub fn edit_product(
        &mut self,
        id: ProductId,
        name: &str,
        price: Money,
        category: &str,
    ) -> CoreResult<bool> {
        let name = validate_product_name(name)?;
        validate_price(price)?;
        self.require_category(category)?;

        let Some(product) = self.data.product_mut(id) else {
            return Ok(false);
        };

        product.name = name.to_string();
        product.price = price;
        product.category = category.to_string();
        Ok(true)
    }

    /// Deletes a product and strips its order line from every table.
    ///
    /// Every table, not just the selected one: a product that no longer
    /// exists must not linger on any open order.
    ///
    /// ## Returns
    /// Whether the product existed.
    pub fn delete_product(&mut self, id: ProductId) -> bool {
        let before = self.data.products.len();
        self.data.products.retain(|p| p.id != id);

        if self.data.products.len() == before {
            return false;
        }

        for table in &mut self.data.tables {
            table.order.retain(|line| line.product_id != id);
        }
        true
    }

    fn require_category(&self, name: &str) -> Result<(), ValidationError> {
        if self.data.has_category(name) {
            Ok(())
        } else {
            Err(ValidationError::UnknownCategory {
                name: name.to_string(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
