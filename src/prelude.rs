//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use persona_quiz::prelude::*;
//!
//! let store = HistoryStore::open(Path::new(".persona-quiz"))?;
//! let winner = compute_result(&answers, QuizKind::Animal)?;
//! ```

pub use crate::error::{Error, Result};

pub use crate::quiz::{Animal, Answer, Category, Major, Question, QuizError, QuizInfo, QuizKind, ResponseMode};

pub use crate::result::{QuizOutcome, TraitScore, compute_result, trait_scores};

pub use crate::session::{Completion, Countdown, QuizSession, SessionError, Tick};

#[cfg(feature = "kv")]
pub use crate::history::FjallBackend;
pub use crate::history::{HistoryBackend, HistoryError, HistoryRecord, HistoryStore, MemoryBackend, Statistics};
