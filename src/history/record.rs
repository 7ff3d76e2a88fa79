//! The persisted record of one completed quiz, and the log's wire format.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::HistoryError;

/// One completed quiz attempt. Never mutated once written.
///
/// Field names on the wire are camelCase; `date` is RFC 3339 with full
/// sub-second precision and `timeTaken` is seconds as a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub quiz_identifier: String,
    pub quiz_title: String,
    /// Display name of the result category.
    pub result: String,
    pub result_emoji: String,
    pub result_description: String,
    /// Completion time.
    pub date: DateTime<Utc>,
    /// Elapsed seconds.
    pub time_taken: f64,
}

impl HistoryRecord {
    /// Completion time in the local zone, e.g. `Oct 17, 2026 at 3:04 PM`.
    pub fn formatted_date(&self) -> String {
        self.formatted_date_in(&Local)
    }

    pub fn formatted_date_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.date
            .with_timezone(tz)
            .format("%b %-d, %Y at %-I:%M %p")
            .to_string()
    }

    /// Elapsed time as `m:ss`.
    pub fn formatted_time(&self) -> String {
        let secs = self.time_taken.max(0.0) as u64;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

/// Serialize a whole log into the stored blob.
pub fn encode_log(records: &[HistoryRecord]) -> Result<Vec<u8>, HistoryError> {
    Ok(serde_json::to_vec(records)?)
}

/// Parse a stored blob back into records, in stored order.
pub fn decode_log(blob: &[u8]) -> Result<Vec<HistoryRecord>, HistoryError> {
    Ok(serde_json::from_slice(blob)?)
}
