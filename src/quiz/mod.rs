//! Quiz content and its data model.
//!
//! Categories are a two-level sum type (quiz kind, then archetype) with
//! static lookups for emoji, name and description. Questions always offer
//! four answers, each voting for one category of the quiz's family.

mod catalog;
mod category;
mod error;
mod question;

pub use catalog::{QUIZZES, QuizInfo};
pub use category::{Animal, Category, Major, QuizKind};
pub use error::QuizError;
pub use question::{ANSWERS_PER_QUESTION, Answer, Question, ResponseMode};
