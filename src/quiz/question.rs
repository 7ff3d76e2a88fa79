//! Questions and their selectable answers.

use serde::{Deserialize, Serialize};

use super::category::{Category, QuizKind};
use super::error::QuizError;

/// Number of answers every question offers.
pub const ANSWERS_PER_QUESTION: usize = 4;

/// How a question collects its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Exactly one answer is chosen.
    Single,
    /// Zero or more answers are chosen.
    Multiple,
    /// A slider position in `[0, 1]` picks exactly one answer.
    Ranged,
}

/// One selectable choice, tagged with the category it votes for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub category: Category,
}

impl Answer {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub mode: ResponseMode,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(text: impl Into<String>, mode: ResponseMode, answers: Vec<Answer>) -> Self {
        Self {
            text: text.into(),
            mode,
            answers,
        }
    }

    pub fn answer(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index)
    }

    /// Map a slider position to an answer index.
    ///
    /// The position is clamped to `[0, 1]` and scaled over the answer list,
    /// rounding half away from zero.
    pub fn ranged_index(&self, position: f32) -> usize {
        let last = self.answers.len().saturating_sub(1);
        let position = if position.is_nan() { 0.5 } else { position.clamp(0.0, 1.0) };
        let index = (position * last as f32).round() as usize;
        index.min(last)
    }

    /// Labels shown at the two ends of a ranged slider.
    pub fn ranged_labels(&self) -> Option<(&str, &str)> {
        let first = self.answers.first()?;
        let last = self.answers.last()?;
        Some((first.text.as_str(), last.text.as_str()))
    }

    /// Check the answer count and that every answer votes within `kind`'s family.
    pub fn validate(&self, kind: QuizKind) -> Result<(), QuizError> {
        if self.answers.len() != ANSWERS_PER_QUESTION {
            return Err(QuizError::MalformedQuestion {
                question: self.text.clone(),
                reason: format!(
                    "expected {} answers, found {}",
                    ANSWERS_PER_QUESTION,
                    self.answers.len()
                ),
            });
        }

        if let Some(stray) = self.answers.iter().find(|a| !a.category.belongs_to(kind)) {
            return Err(QuizError::MalformedQuestion {
                question: self.text.clone(),
                reason: format!("answer '{}' belongs to the {} quiz", stray.text, stray.category.kind()),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::category::{Animal, Major};

    fn ranged() -> Question {
        Question::new(
            "How much do you enjoy car rides?",
            ResponseMode::Ranged,
            vec![
                Answer::new("Hate them", Category::Animal(Animal::Cat)),
                Answer::new("I get a little nervous", Category::Animal(Animal::Rabbit)),
                Answer::new("I barely notice them", Category::Animal(Animal::Turtle)),
                Answer::new("Love them", Category::Animal(Animal::Lion)),
            ],
        )
    }

    #[test]
    fn test_ranged_index() {
        let q = ranged();
        assert_eq!(q.ranged_index(0.0), 0);
        assert_eq!(q.ranged_index(0.2), 1);
        assert_eq!(q.ranged_index(0.5), 2);
        assert_eq!(q.ranged_index(1.0), 3);
        assert_eq!(q.ranged_index(-3.0), 0);
        assert_eq!(q.ranged_index(7.5), 3);
    }

    #[test]
    fn test_ranged_labels() {
        assert_eq!(ranged().ranged_labels(), Some(("Hate them", "Love them")));
    }

    #[test]
    fn test_validate() {
        let q = ranged();
        assert!(q.validate(QuizKind::Animal).is_ok());
        assert!(q.validate(QuizKind::Major).is_err());

        let mut short = ranged();
        short.answers.truncate(3);
        assert!(matches!(
            short.validate(QuizKind::Animal),
            Err(QuizError::MalformedQuestion { .. })
        ));

        let mut mixed = ranged();
        mixed.answers.pop();
        mixed
            .answers
            .push(Answer::new("Spreadsheets", Category::Major(Major::Business)));
        assert!(mixed.validate(QuizKind::Animal).is_err());
    }
}
