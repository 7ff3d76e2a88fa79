//! Unified error type for the persona-quiz library.
//!
//! Each module has its own error enum; [`Error`] wraps them so applications
//! can use one type throughout.
//!
//! ```ignore
//! use persona_quiz::{Result, HistoryStore, QuizKind};
//!
//! fn completed(path: &std::path::Path) -> Result<bool> {
//!     let store = HistoryStore::open(path)?;
//!     Ok(store.has_completed(QuizKind::Major.identifier()))
//! }
//! ```

use thiserror::Error;

use crate::history::HistoryError;
use crate::quiz::QuizError;
use crate::session::SessionError;

#[derive(Error, Debug)]
pub enum Error {
    /// Quiz content or aggregation error.
    #[error(transparent)]
    Quiz(#[from] QuizError),

    /// Quiz run error.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// History persistence error.
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if no answers were available to compute a result.
    pub fn is_empty_response_set(&self) -> bool {
        matches!(
            self,
            Self::Quiz(QuizError::EmptyResponseSet)
                | Self::Session(SessionError::Quiz(QuizError::EmptyResponseSet))
        )
    }

    pub fn is_history(&self) -> bool {
        matches!(self, Self::History(_))
    }
}
