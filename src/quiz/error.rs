//! Error types for the quiz module.

use thiserror::Error;

/// Errors that can occur while interpreting quiz content or answers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("No answers were given, the result cannot be determined")]
    EmptyResponseSet,

    #[error("Unknown quiz: {0}")]
    UnknownQuiz(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Malformed question '{question}': {reason}")]
    MalformedQuestion { question: String, reason: String },
}
