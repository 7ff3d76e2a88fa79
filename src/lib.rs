//! Personality quiz engine with a persistent result history.
//!
//! A quiz run collects one or more answers per question; each answer votes for
//! a personality category (a college major or an animal). The category with
//! the most votes is the result, and the result is appended to a local
//! history log stored in a key-value database.
//!
//! # Quick Start
//!
//! ```ignore
//! use persona_quiz::prelude::*;
//!
//! let store = HistoryStore::open(Path::new(".persona-quiz"))?;
//!
//! let mut session = QuizSession::new(QuizKind::Animal, rand::thread_rng());
//! while let Some(question) = session.current() {
//!     match question.mode {
//!         ResponseMode::Single => session.answer_single(0)?,
//!         ResponseMode::Multiple => session.answer_multiple(&[1, 2])?,
//!         ResponseMode::Ranged => session.answer_ranged(0.75)?,
//!     }
//! }
//!
//! let done = session.finish(chrono::Utc::now())?;
//! println!("{} {}", done.outcome.emoji, done.outcome.headline);
//! store.append(done.record)?;
//! ```
//!
//! # Modules
//!
//! - [`quiz`] - Categories, questions and the static quiz tables
//! - [`result`] - Majority-vote aggregation and trait scores
//! - [`session`] - A single quiz run with its per-question countdown
//! - [`history`] - The persisted history log
//! - [`server`] - HTTP API (requires `server` feature)
//!
//! # Feature Flags
//!
//! - `kv` - fjall-backed durable history (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `server` - Enable the HTTP API server
//! - `full` - Enable all features

mod error;
pub mod history;
mod logging;
pub mod prelude;
pub mod quiz;
pub mod result;
#[cfg(feature = "server")]
pub mod server;
pub mod session;

pub use error::{Error, Result};

pub use history::{HistoryRecord, HistoryStore, Statistics};
pub use quiz::{Answer, Category, Question, QuizError, QuizKind, ResponseMode};
pub use result::{QuizOutcome, compute_result, trait_scores};
pub use session::{QuizSession, SessionError};
