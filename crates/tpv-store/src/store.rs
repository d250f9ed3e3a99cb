//! # DataStore Facade
//!
//! One owner for the whole object graph, the table selection, and the
//! storage backend. Every mutating command goes through here so that the
//! mutate-then-save sequence can never be forgotten at a call site.
//!
//! ## Command Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DataStore Command Flow                             │
//! │                                                                         │
//! │  command (add_product, pay_partial, ...)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  borrow Catalog / Ledger over &mut data ──► pure mutation (tpv-core)   │
//! │       │                                                                 │
//! │       ├── Err(..) ──────────► bubble up, nothing saved                 │
//! │       ├── Ok(false) no-op ──► nothing saved (document untouched)       │
//! │       │                                                                 │
//! │       └── state changed ────► save(): encode whole graph, write whole  │
//! │                               document through the backend              │
//! │                                                                         │
//! │  Selection is session state: select/deselect never save.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail-Soft Startup
//! `open` never fails. An absent, unreadable or malformed document is
//! logged and replaced by the seed catalog; the operator gets a working
//! register either way. Errors AFTER startup (a save that cannot hit the
//! disk) do surface, because by then there is real data to lose.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use tpv_core::{
    Catalog, Ledger, Money, PaymentOutcome, PosData, ProductId, TableId, TableTotals, Ticket,
};

use crate::backend::{FileBackend, MemoryBackend, StorageBackend};
use crate::document;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store Configuration
// =============================================================================

/// Configuration for opening a file-backed store.
///
/// ```rust
/// use tpv_store::StoreConfig;
///
/// let config = StoreConfig::new("/var/lib/tpv/store.json").seed_if_missing(false);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    path: PathBuf,
    seed_if_missing: bool,
}

impl StoreConfig {
    /// Configuration pointing at the given document path, seeding the
    /// default catalog when nothing usable is persisted there.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            seed_if_missing: true,
        }
    }

    /// Whether to seed the default catalog when no document can be loaded.
    /// When `false`, the store starts empty instead. Default: `true`.
    pub fn seed_if_missing(mut self, seed: bool) -> Self {
        self.seed_if_missing = seed;
        self
    }

    /// The document path this configuration points at.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

// =============================================================================
// DataStore
// =============================================================================

/// The single owner of catalog, tables, selection and persistence.
pub struct DataStore {
    data: PosData,
    selected: Option<TableId>,
    backend: Box<dyn StorageBackend>,
}

impl DataStore {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Opens a file-backed store. Never fails: see the module docs on
    /// fail-soft startup.
    pub fn open(config: StoreConfig) -> Self {
        Self::from_backend(
            Box::new(FileBackend::new(config.path.clone())),
            config.seed_if_missing,
        )
    }

    /// Opens a store over any backend.
    pub fn with_backend(backend: impl StorageBackend + 'static, seed_if_missing: bool) -> Self {
        Self::from_backend(Box::new(backend), seed_if_missing)
    }

    /// An in-memory store seeded with the default catalog. For tests and
    /// throwaway sessions.
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new(), true)
    }

    fn from_backend(backend: Box<dyn StorageBackend>, seed_if_missing: bool) -> Self {
        let loaded = match backend.load() {
            Ok(Some(doc)) => match document::parse_persisted(&doc) {
                Ok(data) => {
                    debug!(
                        categories = data.categories.len(),
                        products = data.products.len(),
                        tables = data.tables.len(),
                        "loaded persisted document"
                    );
                    Some(data)
                }
                Err(e) => {
                    warn!(error = %e, "persisted document is malformed, starting over");
                    None
                }
            },
            Ok(None) => {
                info!("no persisted document found");
                None
            }
            Err(e) => {
                warn!(error = %e, "could not read persisted document, starting over");
                None
            }
        };

        // Selection is session state and never survives a restart,
        // so both branches start with no table selected.
        match loaded {
            Some(data) => DataStore {
                data,
                selected: None,
                backend,
            },
            None => {
                let data = if seed_if_missing {
                    info!("seeding default catalog");
                    PosData::seed()
                } else {
                    PosData::default()
                };
                let mut store = DataStore {
                    data,
                    selected: None,
                    backend,
                };
                // Best effort: a read-only medium should not kill startup
                if let Err(e) = store.save() {
                    warn!(error = %e, "could not persist the fresh catalog");
                }
                store
            }
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Read-only view of the whole object graph.
    pub fn data(&self) -> &PosData {
        &self.data
    }

    /// The currently selected table, if any.
    pub fn selected_table(&self) -> Option<TableId> {
        self.selected
    }

    /// Derived totals for a table. `None` when the table does not exist.
    pub fn totals(&self, table_id: TableId) -> Option<TableTotals> {
        self.data.table(table_id).map(|t| t.totals())
    }

    /// Generates a receipt snapshot for a table. `None` when the table is
    /// missing or its order is empty.
    pub fn generate_ticket(&self, table_id: TableId) -> Option<Ticket> {
        tpv_core::ticket::generate(&self.data, table_id)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Encodes the whole object graph and writes it through the backend.
    ///
    /// Compact encoding: this document is machine-read on the next startup,
    /// the pretty form is reserved for [`export`](Self::export).
    pub fn save(&mut self) -> StoreResult<()> {
        let doc = serde_json::to_string(&self.data).map_err(StoreError::Encode)?;
        self.backend.store(&doc)?;
        Ok(())
    }

    // =========================================================================
    // Catalog Commands
    // =========================================================================

    /// Adds a category and saves.
    pub fn add_category(&mut self, name: &str) -> StoreResult<()> {
        Catalog::new(&mut self.data).add_category(name)?;
        self.save()
    }

    /// Renames a category (cascading into products) and saves.
    /// `Ok(false)` when the old name is unknown; nothing is saved then.
    pub fn rename_category(&mut self, old: &str, new: &str) -> StoreResult<bool> {
        let changed = Catalog::new(&mut self.data).rename_category(old, new)?;
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    /// Deletes a category and every product in it, then saves.
    /// `Ok(false)` when the category is unknown; nothing is saved then.
    pub fn delete_category(&mut self, name: &str) -> StoreResult<bool> {
        let changed = Catalog::new(&mut self.data).delete_category(name);
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    /// Adds a product and saves. Returns the assigned id.
    pub fn add_product(&mut self, name: &str, price: Money, category: &str) -> StoreResult<ProductId> {
        let id = Catalog::new(&mut self.data).add_product(name, price, category)?;
        self.save()?;
        Ok(id)
    }

    /// Rewrites a product in place and saves.
    /// `Ok(false)` when the id is unknown; nothing is saved then.
    pub fn edit_product(
        &mut self,
        id: ProductId,
        name: &str,
        price: Money,
        category: &str,
    ) -> StoreResult<bool> {
        let changed = Catalog::new(&mut self.data).edit_product(id, name, price, category)?;
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    /// Deletes a product, strips it from every open order, and saves.
    /// `Ok(false)` when the id is unknown; nothing is saved then.
    pub fn delete_product(&mut self, id: ProductId) -> StoreResult<bool> {
        let changed = Catalog::new(&mut self.data).delete_product(id);
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    // =========================================================================
    // Ledger Commands
    // =========================================================================

    /// Adds a new empty table, saves, and returns its id.
    pub fn add_table(&mut self) -> StoreResult<TableId> {
        let id = Ledger::new(&mut self.data, &mut self.selected).add_table();
        self.save()?;
        Ok(id)
    }

    /// Deletes a table (clearing the selection if it pointed there) and
    /// saves. `Ok(false)` when the id is unknown; nothing is saved then.
    pub fn delete_table(&mut self, table_id: TableId) -> StoreResult<bool> {
        let changed = Ledger::new(&mut self.data, &mut self.selected).delete_table(table_id);
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    /// Selects a table. Session state only: nothing is saved.
    pub fn select_table(&mut self, table_id: TableId) {
        self.selected = Some(table_id);
    }

    /// Clears the selection. Session state only: nothing is saved.
    pub fn deselect_table(&mut self) {
        self.selected = None;
    }

    /// Adds one unit of a product to the selected table's order and saves.
    ///
    /// ## Errors
    /// `NoTableSelected` when no table is selected.
    ///
    /// ## Returns
    /// `Ok(false)` when the product or table lookup misses (no-op, nothing
    /// saved).
    pub fn add_item(&mut self, product_id: ProductId) -> StoreResult<bool> {
        let table_id = self.selected;
        let changed =
            Ledger::new(&mut self.data, &mut self.selected).add_item(table_id, product_id)?;
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    /// Takes a partial payment against a table and saves.
    pub fn pay_partial(&mut self, table_id: TableId, amount: Money) -> StoreResult<PaymentOutcome> {
        let outcome =
            Ledger::new(&mut self.data, &mut self.selected).pay_partial(table_id, amount)?;
        self.save()?;
        Ok(outcome)
    }

    /// Clears a table (order and payments) and saves.
    /// `Ok(false)` when the id is unknown; nothing is saved then.
    pub fn clear_table(&mut self, table_id: TableId) -> StoreResult<bool> {
        let changed = Ledger::new(&mut self.data, &mut self.selected).clear_table(table_id);
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    // =========================================================================
    // Import / Export
    // =========================================================================

    /// Exports the whole store as a pretty-printed JSON document.
    pub fn export(&self) -> StoreResult<String> {
        document::export(&self.data).map_err(StoreError::Encode)
    }

    /// Replaces the whole store with a validated import document and saves.
    ///
    /// All-or-nothing: a document that fails validation leaves the store
    /// exactly as it was, selection included. On success the selection is
    /// reset, since it may point at a table the new data does not have.
    pub fn import(&mut self, doc: &str) -> StoreResult<()> {
        let data = document::import(doc)?;

        info!(
            categories = data.categories.len(),
            products = data.products.len(),
            tables = data.tables.len(),
            "importing document, replacing current store"
        );

        self.data = data;
        self.selected = None;
        self.save()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tpv_core::{CoreError, SEED_TABLE_COUNT};

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("tpv-store-{}-{}.json", std::process::id(), name));
        path
    }

    #[test]
    fn test_empty_backend_seeds_and_persists() {
        let path = temp_path("seeds");
        let _ = fs::remove_file(&path);

        let store = DataStore::open(StoreConfig::new(&path));
        assert_eq!(store.data().categories.len(), 3);
        assert_eq!(store.data().products.len(), 3);
        assert_eq!(store.data().tables.len(), SEED_TABLE_COUNT as usize);

        // The seed was written out, so a second open sees the same data
        let reopened = DataStore::open(StoreConfig::new(&path));
        assert_eq!(reopened.data(), store.data());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_seed_if_missing_false_starts_empty() {
        let store = DataStore::with_backend(MemoryBackend::new(), false);
        assert!(store.data().categories.is_empty());
        assert!(store.data().tables.is_empty());
    }

    #[test]
    fn test_malformed_document_is_replaced_by_seed() {
        let backend = MemoryBackend::with_document("{this is not json");
        let store = DataStore::with_backend(backend, true);
        assert_eq!(*store.data(), PosData::seed());
    }

    #[test]
    fn test_valid_document_loads_instead_of_seeding() {
        let mut source = DataStore::in_memory();
        source.add_category("Vinos").unwrap();
        let doc = serde_json::to_string(source.data()).unwrap();

        let store = DataStore::with_backend(MemoryBackend::with_document(doc), true);
        assert!(store.data().categories.iter().any(|c| c == "Vinos"));
    }

    #[test]
    fn test_mutations_survive_a_restart() {
        let path = temp_path("restart");
        let _ = fs::remove_file(&path);

        let mut store = DataStore::open(StoreConfig::new(&path));
        let id = store
            .add_product("Tarta", Money::from_cents(350), "Postres")
            .unwrap();
        store.select_table(1);
        store.add_item(id).unwrap();
        store.pay_partial(1, Money::from_cents(100)).unwrap();
        drop(store);

        let store = DataStore::open(StoreConfig::new(&path));
        let table = store.data().table(1).unwrap();
        assert_eq!(table.order[0].name, "Tarta");
        assert_eq!(table.paid(), Money::from_cents(100));
        // Selection is session state, gone after restart
        assert_eq!(store.selected_table(), None);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_noop_commands_do_not_save() {
        let mut store = DataStore::in_memory();
        let before = store.export().unwrap();

        assert!(!store.delete_product(99).unwrap());
        assert!(!store.delete_category("Ghost").unwrap());
        assert!(!store.rename_category("Ghost", "Spirit").unwrap());
        assert!(!store.clear_table(99).unwrap());

        assert_eq!(store.export().unwrap(), before);
    }

    #[test]
    fn test_add_item_requires_selection() {
        let mut store = DataStore::in_memory();
        let err = store.add_item(1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::NoTableSelected)
        ));

        store.select_table(2);
        assert!(store.add_item(1).unwrap());
        assert!(store.data().table(2).unwrap().occupied());
    }

    #[test]
    fn test_delete_selected_table_clears_selection() {
        let mut store = DataStore::in_memory();
        store.select_table(4);
        assert!(store.delete_table(4).unwrap());
        assert_eq!(store.selected_table(), None);
    }

    #[test]
    fn test_ticket_reflects_ledger_state() {
        let mut store = DataStore::in_memory();
        assert!(store.generate_ticket(1).is_none()); // empty order

        store.select_table(1);
        store.add_item(1).unwrap();
        store.add_item(1).unwrap();
        store.pay_partial(1, Money::from_cents(100)).unwrap();

        let ticket = store.generate_ticket(1).unwrap();
        assert_eq!(ticket.total, Money::from_cents(300));
        assert_eq!(ticket.paid, Money::from_cents(100));
        assert_eq!(ticket.remaining, Money::from_cents(200));
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut store = DataStore::in_memory();
        store.select_table(1);
        let before = store.export().unwrap();

        // Missing "tables" key: refused, store and selection untouched
        let err = store.import(r#"{"categories": [], "products": []}"#).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Format(crate::FormatError::MissingKey { key: "tables" })
        ));
        assert_eq!(store.export().unwrap(), before);
        assert_eq!(store.selected_table(), Some(1));

        // A valid document replaces everything and resets the selection
        store
            .import(r#"{"categories": ["Solo"], "products": [], "tables": []}"#)
            .unwrap();
        assert_eq!(store.data().categories, ["Solo"]);
        assert!(store.data().tables.is_empty());
        assert_eq!(store.selected_table(), None);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = DataStore::in_memory();
        store.select_table(3);
        store.add_item(2).unwrap();
        store.pay_partial(3, Money::from_cents(50)).unwrap();

        let doc = store.export().unwrap();

        let mut other = DataStore::in_memory();
        other.import(&doc).unwrap();
        assert_eq!(other.data(), store.data());
    }

    #[test]
    fn test_totals_wrapper_matches_table() {
        let mut store = DataStore::in_memory();
        store.select_table(5);
        store.add_item(3).unwrap(); // Hamburguesa 5.00

        let totals = store.totals(5).unwrap();
        assert_eq!(totals.total, Money::from_cents(500));
        assert_eq!(totals.remaining, Money::from_cents(500));
        assert!(store.totals(99).is_none());
    }
}
