//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / FormatError                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  View layer shows a user-visible message; the store keeps its          │
//! │  prior valid state and the process keeps running                       │
//! │                                                                         │
//! │  Exception: the startup load NEVER surfaces an error - an absent or    │
//! │  malformed document is replaced by the seed catalog (fail-soft).       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::document::FormatError;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed to read or write the document.
    ///
    /// ## When This Occurs
    /// - Disk full, permissions, path does not exist
    /// - Never during startup load (which fails soft and seeds)
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory model could not be encoded as JSON.
    ///
    /// ## When This Occurs
    /// Practically never - the model contains only encodable types. Kept
    /// as a variant rather than a panic so `save()` stays total.
    #[error("failed to encode store document: {0}")]
    Encode(#[source] serde_json::Error),

    /// An import document failed validation.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A business rule rejected the operation (wraps tpv-core errors).
    #[error(transparent)]
    Core(#[from] tpv_core::CoreError),
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
