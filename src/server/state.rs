//! Application state management.

use std::path::Path;
use std::sync::Arc;

use crate::history::{FjallBackend, HistoryBackend, HistoryError, HistoryStore, MemoryBackend};

use super::config::Config;

/// History store with its backend chosen at runtime.
pub type SharedStore = HistoryStore<Box<dyn HistoryBackend>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<SharedStore>,
}

impl AppState {
    /// Open the store named in the configuration.
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let backend = FjallBackend::open(Path::new(&config.store.path)).map_err(|e| {
            StateError::OpenStore {
                path: config.store.path.clone(),
                source: e,
            }
        })?;
        let backend: Box<dyn HistoryBackend> = Box::new(backend);
        Ok(Self::new(HistoryStore::new(backend)))
    }

    pub fn new(store: SharedStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// State backed by a throwaway in-memory store.
    pub fn in_memory() -> Self {
        let backend: Box<dyn HistoryBackend> = Box::new(MemoryBackend::new());
        Self::new(HistoryStore::new(backend))
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}

/// Errors that can occur when setting up application state.
#[derive(Debug)]
pub enum StateError {
    OpenStore { path: String, source: HistoryError },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::OpenStore { path, source } => {
                write!(f, "Failed to open history store at '{}': {}", path, source)
            }
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::OpenStore { source, .. } => Some(source),
        }
    }
}
