//! # Import/Export Document Bridge
//!
//! Serializes the full store to a JSON document and validates documents
//! coming the other way.
//!
//! ## Two Parsers, Two Strictness Levels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Document Validation                                 │
//! │                                                                         │
//! │  Startup load (parse_persisted)                                        │
//! │  ├── missing collections default to empty (legacy documents)           │
//! │  ├── missing `payments` defaults to empty (pre-payments documents)     │
//! │  └── anything malformed ──► error ──► caller fails soft and seeds      │
//! │                                                                         │
//! │  User import (import)                                                  │
//! │  ├── all three top-level keys MUST be present                          │
//! │  │     categories, products, tables ──► MissingKey otherwise           │
//! │  └── nested records are fully type-checked ──► Malformed otherwise     │
//! │        (a bad import is rejected up front, never half-loaded)           │
//! │                                                                         │
//! │  Export (export)                                                       │
//! │  └── always well-formed, pretty-printed for human eyes                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown extra fields are tolerated everywhere: historical documents
//! carry stray keys (order lines used to be whole product objects) and
//! rejecting them would strand real data.

use thiserror::Error;
use tpv_core::PosData;

/// The top-level keys every import document must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["categories", "products", "tables"];

// =============================================================================
// Format Error
// =============================================================================

/// Import document validation failures.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A required top-level key is absent.
    #[error("invalid import document: missing required key '{key}'")]
    MissingKey { key: &'static str },

    /// The document is not valid JSON, or a nested record has the wrong
    /// shape (a price that is a string, a table without an id, ...).
    #[error("invalid import document: {0}")]
    Malformed(String),
}

// =============================================================================
// Export
// =============================================================================

/// Renders the full store as a pretty-printed JSON document
/// (`{categories, products, tables}`), ready for download or transfer.
pub fn export(data: &PosData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

// =============================================================================
// Import
// =============================================================================

/// Validates and parses an import document.
///
/// All three top-level keys must be present and every nested record must
/// type-check; the returned `PosData` is complete or the whole document is
/// rejected. Nothing is mutated here - the caller swaps the store only on
/// `Ok`.
pub fn import(document: &str) -> Result<PosData, FormatError> {
    let value: serde_json::Value =
        serde_json::from_str(document).map_err(|e| FormatError::Malformed(e.to_string()))?;

    let Some(object) = value.as_object() else {
        return Err(FormatError::Malformed(
            "top level must be a JSON object".to_string(),
        ));
    };

    for key in REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(FormatError::MissingKey { key });
        }
    }

    serde_json::from_value(value).map_err(|e| FormatError::Malformed(e.to_string()))
}

/// Parses a document previously written by `save()`.
///
/// More lenient than [`import`]: top-level collections may be absent
/// (they default to empty), which keeps documents from older revisions
/// loading. A type error still fails - the caller treats that as "absent"
/// and seeds.
pub fn parse_persisted(document: &str) -> Result<PosData, FormatError> {
    serde_json::from_str(document).map_err(|e| FormatError::Malformed(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tpv_core::Money;

    #[test]
    fn test_export_is_pretty_and_complete() {
        let doc = export(&PosData::seed()).unwrap();

        assert!(doc.contains('\n')); // human-readable indentation
        for key in REQUIRED_KEYS {
            assert!(doc.contains(&format!("\"{key}\"")));
        }
        assert!(doc.contains("\"Café\""));
    }

    #[test]
    fn test_export_import_round_trip_is_identity() {
        let original = PosData::seed();
        let doc = export(&original).unwrap();
        let imported = import(&doc).unwrap();
        assert_eq!(imported, original);
    }

    #[test]
    fn test_import_requires_every_top_level_key() {
        let err = import(r#"{"categories": [], "products": []}"#).unwrap_err();
        assert!(matches!(err, FormatError::MissingKey { key: "tables" }));

        let err = import(r#"{"products": [], "tables": []}"#).unwrap_err();
        assert!(matches!(err, FormatError::MissingKey { key: "categories" }));
    }

    #[test]
    fn test_import_rejects_non_objects_and_garbage() {
        assert!(matches!(import("[]"), Err(FormatError::Malformed(_))));
        assert!(matches!(import("not json"), Err(FormatError::Malformed(_))));
    }

    #[test]
    fn test_import_rejects_malformed_nested_records() {
        // A price that is a string must not reach the live model
        let doc = r#"{
            "categories": ["Bebidas"],
            "products": [{"id": 1, "name": "Café", "price": "1.50", "category": "Bebidas"}],
            "tables": []
        }"#;
        assert!(matches!(import(doc), Err(FormatError::Malformed(_))));

        // A table without an id is equally dead on arrival
        let doc = r#"{
            "categories": [],
            "products": [],
            "tables": [{"occupied": false, "order": []}]
        }"#;
        assert!(matches!(import(doc), Err(FormatError::Malformed(_))));
    }

    #[test]
    fn test_import_tolerates_extra_fields() {
        let doc = r#"{
            "categories": ["Bebidas"],
            "products": [],
            "tables": [],
            "version": 4
        }"#;
        let data = import(doc).unwrap();
        assert_eq!(data.categories, ["Bebidas"]);
    }

    #[test]
    fn test_import_migrates_missing_payments() {
        // Documents written before partial payments existed
        let doc = r#"{
            "categories": [],
            "products": [],
            "tables": [{"id": 1, "occupied": true,
                        "order": [{"id": 1, "name": "Café", "price": 1.5}]}]
        }"#;
        let data = import(doc).unwrap();
        let table = data.table(1).unwrap();
        assert!(table.payments.is_empty());
        assert_eq!(table.paid(), Money::zero());
        assert_eq!(table.order[0].quantity, 1); // quantity also defaulted
    }

    #[test]
    fn test_parse_persisted_tolerates_missing_collections() {
        let data = parse_persisted(r#"{"categories": ["Bebidas"]}"#).unwrap();
        assert_eq!(data.categories, ["Bebidas"]);
        assert!(data.tables.is_empty());

        // But import of the same document is refused
        assert!(matches!(
            import(r#"{"categories": ["Bebidas"]}"#),
            Err(FormatError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_parse_persisted_rejects_type_errors() {
        assert!(parse_persisted(r#"{"categories": [1, 2]}"#).is_err());
        assert!(parse_persisted("{{").is_err());
    }
}
