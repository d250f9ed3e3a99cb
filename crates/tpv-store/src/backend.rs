//! # Storage Backends
//!
//! The one seam between the store and the outside world: something that
//! can hold exactly one document.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      StorageBackend Contract                            │
//! │                                                                         │
//! │  load()  ──► Ok(Some(doc))   there is a persisted document             │
//! │          ──► Ok(None)        nothing persisted yet (NOT an error)      │
//! │          ──► Err(io)         the medium itself failed                  │
//! │                                                                         │
//! │  store() ──► overwrites the previous document unconditionally.         │
//! │              Last writer wins; no merge, no versioning, no locking.    │
//! │                                                                         │
//! │  Both calls are synchronous and complete before returning.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two implementations: a file on disk for real deployments and an
//! in-memory slot for tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

// =============================================================================
// StorageBackend
// =============================================================================

/// Holds one document. See the module docs for the contract.
pub trait StorageBackend {
    /// Reads the persisted document, if there is one.
    fn load(&self) -> io::Result<Option<String>>;

    /// Writes the document, replacing whatever was there.
    fn store(&mut self, document: &str) -> io::Result<()>;
}

// =============================================================================
// FileBackend
// =============================================================================

/// A single file on disk, read and written whole.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Creates a backend for the given path. The file does not need to
    /// exist yet; missing parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend { path: path.into() }
    }

    /// The path this backend reads and writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store(&mut self, document: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, document)?;
        debug!(path = %self.path.display(), bytes = document.len(), "document written");
        Ok(())
    }
}

// =============================================================================
// MemoryBackend
// =============================================================================

/// An in-memory document slot. For tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    document: Option<String>,
}

impl MemoryBackend {
    /// Creates an empty backend (nothing persisted yet).
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Creates a backend pre-loaded with a document, as if a previous
    /// session had saved it.
    pub fn with_document(document: impl Into<String>) -> Self {
        MemoryBackend {
            document: Some(document.into()),
        }
    }

    /// The currently held document, if any.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.document.clone())
    }

    fn store(&mut self, document: &str) -> io::Result<()> {
        self.document = Some(document.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("tpv-backend-{}-{}", std::process::id(), name));
        path
    }

    #[test]
    fn test_memory_backend_round_trip() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.load().unwrap(), None);

        backend.store("{\"a\": 1}").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("{\"a\": 1}"));

        // Unconditional overwrite
        backend.store("{}").unwrap();
        assert_eq!(backend.document(), Some("{}"));
    }

    #[test]
    fn test_memory_backend_with_document() {
        let backend = MemoryBackend::with_document("{}");
        assert_eq!(backend.load().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_backend_missing_file_is_none() {
        let backend = FileBackend::new(temp_path("missing"));
        assert_eq!(backend.load().unwrap(), None);
    }

    #[test]
    fn test_file_backend_round_trip() {
        let path = temp_path("round-trip");
        let mut backend = FileBackend::new(&path);

        backend.store("first").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("first"));

        backend.store("second").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("second"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_backend_creates_parent_directories() {
        let mut dir = std::env::temp_dir();
        dir.push(format!("tpv-backend-nested-{}", std::process::id()));
        let path = dir.join("deep").join("store.json");

        let mut backend = FileBackend::new(&path);
        backend.store("{}").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("{}"));

        let _ = fs::remove_dir_all(dir);
    }
}
