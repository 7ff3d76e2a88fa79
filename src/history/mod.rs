//! Local history of completed quizzes.
//!
//! The log is stored as one serialized blob under a single key of a
//! key-value backend. [`HistoryStore`] is constructed once by the application
//! and handed to whoever needs it.

mod backend;
mod error;
mod record;
mod store;

#[cfg(feature = "kv")]
pub use backend::FjallBackend;
pub use backend::{HISTORY_KEY, HistoryBackend, MemoryBackend};
pub use error::HistoryError;
pub use record::{HistoryRecord, decode_log, encode_log};
pub use store::{HistoryStore, Statistics};
