//! Error types for the history log.

use thiserror::Error;

/// Errors that can occur while persisting the history log.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "kv")]
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("History backend lock poisoned")]
    Poisoned,

    /// JSON has no representation for NaN or infinity.
    #[error("Record duration must be finite, got {0}")]
    NonFiniteDuration(f64),
}
