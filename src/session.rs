//! One quiz attempt, from the first question to the recorded result.
//!
//! A [`QuizSession`] shuffles the quiz's questions (and each question's
//! answers), collects the chosen answers question by question, and on
//! [`finish`](QuizSession::finish) hands them to the aggregator and builds the
//! history record. A [`Countdown`] tracks the per-question time budget; when it
//! expires the caller invokes [`time_out`](QuizSession::time_out), which picks a
//! random answer exactly as if the user had chosen it.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::history::HistoryRecord;
use crate::logging::{debug, info};
use crate::quiz::{Answer, Question, QuizError, QuizKind, ResponseMode};
use crate::result::QuizOutcome;

/// Seconds allowed per question.
pub const DEFAULT_TIME_LIMIT: u32 = 30;

/// Remaining seconds at or below which the countdown reports a warning.
pub const WARNING_THRESHOLD: u32 = 10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("All questions have been answered")]
    Finished,

    #[error("{remaining} question(s) still unanswered")]
    Unfinished { remaining: usize },

    #[error("Question expects a {expected:?} answer, got {got:?}")]
    WrongMode {
        expected: ResponseMode,
        got: ResponseMode,
    },

    #[error("Answer {index} out of range (question has {len} answers)")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// State reported by [`Countdown::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(u32),
    /// Time is running low.
    Warning(u32),
    Expired,
}

/// Per-question countdown in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    budget: u32,
    remaining: u32,
}

impl Countdown {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            remaining: budget,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Restart for the next question.
    pub fn reset(&mut self) {
        self.remaining = self.budget;
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Tick {
        self.remaining = self.remaining.saturating_sub(1);
        match self.remaining {
            0 => Tick::Expired,
            n if n <= WARNING_THRESHOLD => Tick::Warning(n),
            n => Tick::Running(n),
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_LIMIT)
    }
}

/// The result of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub kind: QuizKind,
    pub outcome: QuizOutcome,
    /// Elapsed seconds from start to finish.
    pub time_taken: f64,
    /// Ready to append to the history store.
    pub record: HistoryRecord,
}

pub struct QuizSession<R> {
    kind: QuizKind,
    questions: Vec<Question>,
    index: usize,
    chosen: Vec<Answer>,
    started_at: DateTime<Utc>,
    rng: R,
}

impl<R: Rng> QuizSession<R> {
    /// Start a run of `kind` now.
    pub fn new(kind: QuizKind, rng: R) -> Self {
        Self::starting_at(kind, rng, Utc::now())
    }

    /// Start a run of `kind` with an explicit start time.
    pub fn starting_at(kind: QuizKind, mut rng: R, started_at: DateTime<Utc>) -> Self {
        let mut questions = kind.questions().to_vec();
        questions.shuffle(&mut rng);
        for q in &mut questions {
            q.answers.shuffle(&mut rng);
        }
        debug!(quiz = %kind, questions = questions.len(), "quiz session started");

        Self {
            kind,
            questions,
            index: 0,
            chosen: Vec::new(),
            started_at,
            rng,
        }
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The question awaiting an answer, `None` once all are answered.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Zero-based index of the current question and the question count.
    pub fn position(&self) -> (usize, usize) {
        (self.index, self.questions.len())
    }

    /// Fraction of questions answered so far.
    pub fn progress(&self) -> f32 {
        if self.questions.is_empty() {
            return 1.0;
        }
        self.index as f32 / self.questions.len() as f32
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// Answers collected so far, in the order they were chosen.
    pub fn answers(&self) -> &[Answer] {
        &self.chosen
    }

    pub fn answer_single(&mut self, index: usize) -> Result<(), SessionError> {
        let question = self.expect_mode(ResponseMode::Single)?;
        let answer = pick(question, index)?.clone();
        self.record_and_advance(vec![answer]);
        Ok(())
    }

    /// Record the selected answers. An empty selection is allowed.
    ///
    /// Selected answers are recorded once each, in the question's answer order.
    pub fn answer_multiple(&mut self, indices: &[usize]) -> Result<(), SessionError> {
        let question = self.expect_mode(ResponseMode::Multiple)?;
        for &i in indices {
            pick(question, i)?;
        }
        let selected = question
            .answers
            .iter()
            .enumerate()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, a)| a.clone())
            .collect();
        self.record_and_advance(selected);
        Ok(())
    }

    /// Record the answer under a slider position in `[0, 1]`.
    pub fn answer_ranged(&mut self, position: f32) -> Result<(), SessionError> {
        let question = self.expect_mode(ResponseMode::Ranged)?;
        let answer = pick(question, question.ranged_index(position))?.clone();
        self.record_and_advance(vec![answer]);
        Ok(())
    }

    /// The countdown ran out: pick one answer of the current question at random.
    pub fn time_out(&mut self) -> Result<Answer, SessionError> {
        let question = self.questions.get(self.index).ok_or(SessionError::Finished)?;
        let answer = question
            .answers
            .choose(&mut self.rng)
            .cloned()
            .ok_or(SessionError::AnswerOutOfRange { index: 0, len: 0 })?;
        info!(quiz = %self.kind, question = self.index, "time ran out, picked a random answer");
        self.record_and_advance(vec![answer.clone()]);
        Ok(answer)
    }

    /// Aggregate the run into a result and its history record.
    pub fn finish(self, now: DateTime<Utc>) -> Result<Completion, SessionError> {
        if !self.is_finished() {
            return Err(SessionError::Unfinished {
                remaining: self.questions.len() - self.index,
            });
        }

        let time_taken = (now - self.started_at).num_milliseconds().max(0) as f64 / 1000.0;
        let outcome = QuizOutcome::from_answers(&self.chosen, self.kind)?;
        let record = outcome.to_record(now, time_taken);
        info!(quiz = %self.kind, result = %outcome.category, time_taken, "quiz finished");

        Ok(Completion {
            kind: self.kind,
            outcome,
            time_taken,
            record,
        })
    }

    fn expect_mode(&self, expected: ResponseMode) -> Result<&Question, SessionError> {
        let question = self.current().ok_or(SessionError::Finished)?;
        if question.mode != expected {
            return Err(SessionError::WrongMode {
                expected: question.mode,
                got: expected,
            });
        }
        Ok(question)
    }

    fn record_and_advance(&mut self, answers: Vec<Answer>) {
        self.chosen.extend(answers);
        self.index += 1;
    }
}

fn pick(question: &Question, index: usize) -> Result<&Answer, SessionError> {
    question.answer(index).ok_or(SessionError::AnswerOutOfRange {
        index,
        len: question.answers.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(kind: QuizKind) -> QuizSession<StdRng> {
        QuizSession::starting_at(kind, StdRng::seed_from_u64(7), Utc::now())
    }

    /// Answer every question with its first option (or a mid slider).
    fn answer_all<R: Rng>(s: &mut QuizSession<R>) {
        while let Some(q) = s.current() {
            match q.mode {
                ResponseMode::Single => s.answer_single(0).unwrap(),
                ResponseMode::Multiple => s.answer_multiple(&[0, 2]).unwrap(),
                ResponseMode::Ranged => s.answer_ranged(0.5).unwrap(),
            }
        }
    }

    #[test]
    fn test_countdown() {
        let mut c = Countdown::new(12);
        assert_eq!(c.tick(), Tick::Running(11));
        assert_eq!(c.tick(), Tick::Warning(10));
        for _ in 0..9 {
            c.tick();
        }
        assert_eq!(c.remaining(), 1);
        assert_eq!(c.tick(), Tick::Expired);
        assert_eq!(c.tick(), Tick::Expired);
        c.reset();
        assert_eq!(c.remaining(), 12);
        assert_eq!(Countdown::default().budget(), DEFAULT_TIME_LIMIT);
    }

    #[test]
    fn test_session_covers_every_question() {
        let mut s = session(QuizKind::Major);
        let (_, total) = s.position();
        assert_eq!(total, QuizKind::Major.questions().len());

        answer_all(&mut s);
        assert!(s.is_finished());
        assert_eq!(s.progress(), 1.0);
        assert!(s.answers().iter().all(|a| a.category.belongs_to(QuizKind::Major)));
    }

    #[test]
    fn test_wrong_mode_is_rejected() {
        let mut s = session(QuizKind::Animal);
        let mode = s.current().unwrap().mode;
        let err = match mode {
            ResponseMode::Single => s.answer_ranged(0.0),
            _ => s.answer_single(0),
        };
        assert!(matches!(err, Err(SessionError::WrongMode { .. })));
        assert_eq!(s.position().0, 0);
    }

    #[test]
    fn test_out_of_range_answer() {
        let mut s = session(QuizKind::Animal);
        while s.current().unwrap().mode != ResponseMode::Single {
            s.time_out().unwrap();
        }
        assert_eq!(
            s.answer_single(4),
            Err(SessionError::AnswerOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_multiple_records_each_selection_once() {
        let mut s = session(QuizKind::Major);
        while s.current().unwrap().mode != ResponseMode::Multiple {
            s.time_out().unwrap();
        }
        let before = s.answers().len();
        s.answer_multiple(&[3, 1, 3]).unwrap();
        assert_eq!(s.answers().len(), before + 2);
    }

    #[test]
    fn test_time_out_picks_from_current_question() {
        let mut s = session(QuizKind::Animal);
        let options = s.current().unwrap().answers.clone();
        let picked = s.time_out().unwrap();
        assert!(options.contains(&picked));
        assert_eq!(s.answers(), &[picked]);
        assert_eq!(s.position().0, 1);
    }

    #[test]
    fn test_all_timeouts_still_produce_a_result() {
        let start = Utc::now();
        let mut s = QuizSession::starting_at(QuizKind::Animal, StdRng::seed_from_u64(1), start);
        while !s.is_finished() {
            s.time_out().unwrap();
        }
        assert_eq!(s.time_out(), Err(SessionError::Finished));

        let done = s.finish(start + Duration::milliseconds(95_500)).unwrap();
        assert_eq!(done.time_taken, 95.5);
        assert!(done.outcome.category.belongs_to(QuizKind::Animal));
        assert_eq!(done.record.quiz_identifier, "animal-quiz");
        assert_eq!(done.record.time_taken, 95.5);
    }

    #[test]
    fn test_finish_requires_all_answers() {
        let s = session(QuizKind::Major);
        let total = s.position().1;
        assert_eq!(
            s.finish(Utc::now()),
            Err(SessionError::Unfinished { remaining: total })
        );
    }

    #[test]
    fn test_empty_run_reports_empty_response_set() {
        let mut s = session(QuizKind::Major);
        s.questions.retain(|q| q.mode == ResponseMode::Multiple);
        while !s.is_finished() {
            s.answer_multiple(&[]).unwrap();
        }
        assert_eq!(
            s.finish(Utc::now()),
            Err(SessionError::Quiz(QuizError::EmptyResponseSet))
        );
    }
}
