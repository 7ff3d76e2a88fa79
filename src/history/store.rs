//! The history log: append-only records with query and deletion.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

#[cfg(feature = "kv")]
use std::path::Path;

use super::backend::{HistoryBackend, MemoryBackend};
#[cfg(feature = "kv")]
use super::backend::FjallBackend;
use super::error::HistoryError;
use super::record::{HistoryRecord, decode_log, encode_log};
use crate::logging::{debug, error, info, warn};

/// Aggregate numbers over the whole log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub total_count: usize,
    pub unique_quiz_count: usize,
    /// Sum of all elapsed times, in seconds.
    pub total_duration: f64,
}

impl Statistics {
    /// Total duration in whole minutes.
    pub fn total_minutes(&self) -> u64 {
        self.total_duration.max(0.0) as u64 / 60
    }
}

/// Persistent log of completed quizzes.
///
/// Every mutation reads the whole log, changes it and writes it back as one
/// blob. A mutex serializes those cycles so concurrent callers sharing one
/// store never interleave a read with another caller's write.
///
/// Reads never fail: a missing or unreadable blob reads as an empty log.
pub struct HistoryStore<B = MemoryBackend> {
    backend: B,
    lock: Mutex<()>,
}

impl HistoryStore<MemoryBackend> {
    /// A store that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

#[cfg(feature = "kv")]
impl HistoryStore<FjallBackend> {
    /// Open (or create) a durable store at `path`.
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        Ok(Self::new(FjallBackend::open(path)?))
    }
}

impl<B: HistoryBackend> HistoryStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Add a record. Records with the same quiz identifier are kept side by side.
    ///
    /// A record with a non-finite `time_taken` is rejected and the log is left as is.
    pub fn append(&self, record: HistoryRecord) -> Result<(), HistoryError> {
        if !record.time_taken.is_finite() {
            warn!(quiz = %record.quiz_identifier, "rejecting record with non-finite duration");
            return Err(HistoryError::NonFiniteDuration(record.time_taken));
        }
        let _guard = self.guard();
        let mut log = self.read_sorted();
        debug!(quiz = %record.quiz_identifier, result = %record.result, "appending history record");
        log.push(record);
        self.write(&log)
    }

    /// All records, most recent first.
    pub fn get_all(&self) -> Vec<HistoryRecord> {
        let _guard = self.guard();
        self.read_sorted()
    }

    /// Whether any record exists for `identifier`.
    pub fn has_completed(&self, identifier: &str) -> bool {
        self.get_all()
            .iter()
            .any(|r| r.quiz_identifier == identifier)
    }

    /// The most recent record for `identifier`.
    pub fn get_latest(&self, identifier: &str) -> Option<HistoryRecord> {
        self.get_all()
            .into_iter()
            .find(|r| r.quiz_identifier == identifier)
    }

    /// Remove every record.
    pub fn clear_all(&self) -> Result<(), HistoryError> {
        let _guard = self.guard();
        self.backend.remove().inspect_err(|_e| {
            error!(error = %_e, "failed to clear history");
        })?;
        info!("history cleared");
        Ok(())
    }

    /// Remove the record at `index` of the most-recent-first view.
    ///
    /// An index past the end is ignored and returns `Ok(None)`.
    pub fn delete_at(&self, index: usize) -> Result<Option<HistoryRecord>, HistoryError> {
        let _guard = self.guard();
        let mut log = self.read_sorted();
        if index >= log.len() {
            debug!(index, len = log.len(), "delete index out of range, ignoring");
            return Ok(None);
        }
        let removed = log.remove(index);
        self.write(&log)?;
        Ok(Some(removed))
    }

    pub fn get_statistics(&self) -> Statistics {
        let log = self.get_all();
        let unique: HashSet<&str> = log.iter().map(|r| r.quiz_identifier.as_str()).collect();
        Statistics {
            total_count: log.len(),
            unique_quiz_count: unique.len(),
            total_duration: log.iter().map(|r| r.time_taken).sum(),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded unit holds no data, so a poisoned lock is still usable.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_sorted(&self) -> Vec<HistoryRecord> {
        let blob = match self.backend.load() {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(_e) => {
                warn!(error = %_e, "history unreadable, treating as empty");
                return Vec::new();
            }
        };

        let mut log = match decode_log(&blob) {
            Ok(log) => log,
            Err(_e) => {
                warn!(error = %_e, bytes = blob.len(), "history blob undecodable, treating as empty");
                return Vec::new();
            }
        };

        log.sort_by(|a, b| b.date.cmp(&a.date));
        log
    }

    fn write(&self, log: &[HistoryRecord]) -> Result<(), HistoryError> {
        let blob = encode_log(log)?;
        self.backend.save(&blob).inspect_err(|_e| {
            error!(error = %_e, records = log.len(), "failed to persist history");
        })
    }
}
