//! Result aggregation: majority vote over the chosen answers.
//!
//! Each chosen answer casts one vote for its category. The category with the
//! most votes wins. When several categories share the top count, the one whose
//! first vote appears earliest in the answer sequence wins, so the outcome only
//! depends on what was answered and in which order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::history::HistoryRecord;
use crate::logging::warn;
use crate::quiz::{Animal, Answer, Category, Major, QuizError, QuizKind};

/// Pick the winning category for a quiz run.
///
/// Answers from another quiz's family do not vote. Fails with
/// [`QuizError::EmptyResponseSet`] when no answer votes.
pub fn compute_result(answers: &[Answer], kind: QuizKind) -> Result<Category, QuizError> {
    tally(answers.iter().map(|a| a.category), kind)
}

/// Same as [`compute_result`] over bare category tags.
pub fn compute_result_from_categories(
    categories: &[Category],
    kind: QuizKind,
) -> Result<Category, QuizError> {
    tally(categories.iter().copied(), kind)
}

fn tally(votes: impl Iterator<Item = Category>, kind: QuizKind) -> Result<Category, QuizError> {
    // First-seen order is kept so ties resolve to the earliest voter.
    let mut counts: Vec<(Category, usize)> = Vec::with_capacity(4);

    for category in votes {
        if !category.belongs_to(kind) {
            warn!(category = %category, quiz = %kind, "ignoring answer from another quiz");
            continue;
        }
        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, n)) => *n += 1,
            None => counts.push((category, 1)),
        }
    }

    let mut best: Option<(Category, usize)> = None;
    for &(category, n) in &counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((category, n));
        }
    }

    best.map(|(category, _)| category)
        .ok_or(QuizError::EmptyResponseSet)
}

/// One illustrative trait bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraitScore {
    pub label: &'static str,
    /// In `[0, 1]`.
    pub score: f32,
}

impl TraitScore {
    const fn new(label: &'static str, score: f32) -> Self {
        Self { label, score }
    }

    /// Whole percentage, truncated.
    pub fn percent(&self) -> u32 {
        (self.score * 100.0) as u32
    }
}

/// The three trait bars shown for a category. Display only.
pub fn trait_scores(category: Category) -> [TraitScore; 3] {
    use TraitScore as T;

    match category {
        Category::Major(Major::Business) => [
            T::new("Leadership", 0.95),
            T::new("Communication", 0.92),
            T::new("Strategic Thinking", 0.88),
        ],
        Category::Major(Major::Engineering) => [
            T::new("Problem Solving", 0.96),
            T::new("Analytical Skills", 0.94),
            T::new("Technical Aptitude", 0.90),
        ],
        Category::Major(Major::Arts) => [
            T::new("Creativity", 0.98),
            T::new("Expression", 0.92),
            T::new("Imagination", 0.95),
        ],
        Category::Major(Major::Science) => [
            T::new("Research Skills", 0.96),
            T::new("Critical Thinking", 0.94),
            T::new("Curiosity", 0.97),
        ],
        Category::Animal(Animal::Lion) => [
            T::new("Energy", 0.95),
            T::new("Social", 0.98),
            T::new("Courage", 0.96),
        ],
        Category::Animal(Animal::Cat) => [
            T::new("Independence", 0.92),
            T::new("Curiosity", 0.88),
            T::new("Playfulness", 0.85),
        ],
        Category::Animal(Animal::Rabbit) => [
            T::new("Gentleness", 0.96),
            T::new("Energy", 0.94),
            T::new("Sociability", 0.88),
        ],
        Category::Animal(Animal::Turtle) => [
            T::new("Patience", 0.98),
            T::new("Wisdom", 0.95),
            T::new("Calmness", 0.92),
        ],
    }
}

/// Everything a renderer needs to show a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOutcome {
    pub category: Category,
    pub headline: String,
    pub emoji: &'static str,
    pub name: &'static str,
    pub definition: &'static str,
    pub traits: [TraitScore; 3],
}

impl QuizOutcome {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            headline: category.headline(),
            emoji: category.emoji(),
            name: category.name(),
            definition: category.definition(),
            traits: trait_scores(category),
        }
    }

    /// Aggregate `answers` and describe the winner.
    pub fn from_answers(answers: &[Answer], kind: QuizKind) -> Result<Self, QuizError> {
        compute_result(answers, kind).map(Self::new)
    }

    /// Build the history entry for this outcome.
    ///
    /// Negative or non-finite durations are stored as zero.
    pub fn to_record(&self, date: DateTime<Utc>, time_taken: f64) -> HistoryRecord {
        let time_taken = if time_taken.is_finite() { time_taken.max(0.0) } else { 0.0 };
        let info = self.category.kind().info();
        HistoryRecord {
            quiz_identifier: info.identifier.to_string(),
            quiz_title: info.title.to_string(),
            result: self.name.to_string(),
            result_emoji: self.emoji.to_string(),
            result_description: self.definition.to_string(),
            date,
            time_taken,
        }
    }
}
