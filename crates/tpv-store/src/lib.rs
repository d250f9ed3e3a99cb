//! # tpv-store: Persistence Layer for tpv
//!
//! This crate wraps the pure business logic of `tpv-core` with the one
//! piece of I/O the system has: a single JSON document, read once at
//! startup and rewritten whole after every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           tpv Data Flow                                 │
//! │                                                                         │
//! │  View layer command (add item, pay, import, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tpv-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   DataStore   │    │   document    │    │   backend    │  │   │
//! │  │   │  (store.rs)   │    │ import/export │    │ file/memory  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ load-or-seed  │◄───│ strict schema │    │ load/store   │  │   │
//! │  │   │ mutate + save │    │ key checks    │    │ one document │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One JSON file (or an in-memory slot in tests)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Single-threaded, synchronous, cooperative. Every mutate-then-save
//! sequence runs to completion before the next command; within one running
//! instance the model is never observed half-updated. There is no
//! cross-instance coordination: two instances on the same file are
//! last-writer-wins, and that is an accepted limitation.
//!
//! ## Module Organization
//!
//! - [`store`] - `DataStore` facade and `StoreConfig`
//! - [`backend`] - `StorageBackend` trait, file and in-memory backends
//! - [`document`] - import/export bridge with strict schema validation
//! - [`error`] - store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod document;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use document::FormatError;
pub use error::{StoreError, StoreResult};
pub use store::{DataStore, StoreConfig};
