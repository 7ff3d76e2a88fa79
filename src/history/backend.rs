//! Blob storage for the history log.
//!
//! The whole log lives under a single key. Backends only move opaque bytes;
//! encoding and sorting are the store's business.

use std::sync::Mutex;

#[cfg(feature = "kv")]
use std::path::Path;

#[cfg(feature = "kv")]
use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use super::error::HistoryError;
#[cfg(feature = "kv")]
use crate::logging::info;

/// Key under which the serialized log is stored.
pub const HISTORY_KEY: &str = "quizHistory";

/// A place to keep one serialized history blob.
pub trait HistoryBackend: Send + Sync {
    /// Read the blob, `None` if it was never written or was removed.
    fn load(&self) -> Result<Option<Vec<u8>>, HistoryError>;

    /// Replace the blob.
    fn save(&self, blob: &[u8]) -> Result<(), HistoryError>;

    /// Drop the blob entirely.
    fn remove(&self) -> Result<(), HistoryError>;
}

impl<B: HistoryBackend + ?Sized> HistoryBackend for Box<B> {
    fn load(&self) -> Result<Option<Vec<u8>>, HistoryError> {
        (**self).load()
    }

    fn save(&self, blob: &[u8]) -> Result<(), HistoryError> {
        (**self).save(blob)
    }

    fn remove(&self) -> Result<(), HistoryError> {
        (**self).remove()
    }
}

/// Process-local backend, gone when dropped.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing blob, e.g. to simulate a damaged store.
    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }
}

impl HistoryBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Vec<u8>>, HistoryError> {
        let blob = self.blob.lock().map_err(|_| HistoryError::Poisoned)?;
        Ok(blob.clone())
    }

    fn save(&self, blob: &[u8]) -> Result<(), HistoryError> {
        let mut slot = self.blob.lock().map_err(|_| HistoryError::Poisoned)?;
        *slot = Some(blob.to_vec());
        Ok(())
    }

    fn remove(&self) -> Result<(), HistoryError> {
        let mut slot = self.blob.lock().map_err(|_| HistoryError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

/// Durable backend on a fjall database directory.
#[cfg(feature = "kv")]
pub struct FjallBackend {
    db: fjall::Database,
    keyspace: Keyspace,
}

#[cfg(feature = "kv")]
impl FjallBackend {
    /// Keyspace holding the history key.
    pub const KEYSPACE: &'static str = "history";

    /// Open the database at `path`, creating it if missing.
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        let db = fjall::Database::builder(path).open()?;
        let keyspace = db.keyspace(Self::KEYSPACE, KeyspaceCreateOptions::default)?;
        info!(path = %path.display(), "history store opened");
        Ok(Self { db, keyspace })
    }
}

#[cfg(feature = "kv")]
impl HistoryBackend for FjallBackend {
    fn load(&self) -> Result<Option<Vec<u8>>, HistoryError> {
        Ok(self.keyspace.get(HISTORY_KEY)?.map(|v| v.to_vec()))
    }

    fn save(&self, blob: &[u8]) -> Result<(), HistoryError> {
        self.keyspace.insert(HISTORY_KEY, blob)?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), HistoryError> {
        self.keyspace.remove(HISTORY_KEY)?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load().unwrap(), None);
        backend.save(b"[]").unwrap();
        assert_eq!(backend.load().unwrap(), Some(b"[]".to_vec()));
        backend.remove().unwrap();
        assert_eq!(backend.load().unwrap(), None);
    }
}
