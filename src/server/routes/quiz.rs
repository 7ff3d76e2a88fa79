//! Quiz catalog and scoring handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::quiz::{Category, QUIZZES, Question, QuizInfo, QuizKind};
use crate::result::{QuizOutcome, compute_result_from_categories};

use super::super::{error::ApiError, state::AppState};

/// Catalog entry plus whether the quiz appears in the history.
#[derive(Debug, Serialize)]
pub struct QuizSummary {
    #[serde(flatten)]
    pub info: QuizInfo,
    pub question_count: usize,
    pub completed: bool,
}

/// List the quiz catalog.
pub async fn list_quizzes(State(state): State<AppState>) -> Json<Vec<QuizSummary>> {
    let store = state.store();
    let quizzes = QUIZZES
        .iter()
        .map(|info| QuizSummary {
            info: *info,
            question_count: info.kind.questions().len(),
            completed: store.has_completed(info.identifier),
        })
        .collect();
    Json(quizzes)
}

#[derive(Debug, Deserialize, Default)]
pub struct QuestionsQuery {
    /// Shuffle question order and answer order within each question.
    #[serde(default)]
    pub shuffle: bool,
}

/// Get a quiz's question table.
pub async fn get_questions(
    Path(identifier): Path<String>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let kind = resolve(&identifier)?;
    let mut questions = kind.questions().to_vec();
    if query.shuffle {
        shuffle_questions(&mut questions);
    }
    Ok(Json(questions))
}

fn shuffle_questions(questions: &mut [Question]) {
    let mut rng = rand::thread_rng();
    questions.shuffle(&mut rng);
    for question in questions.iter_mut() {
        question.answers.shuffle(&mut rng);
    }
}

/// Request body for scoring a quiz run.
#[derive(Debug, Deserialize)]
pub struct ResultRequest {
    /// Category tags of the chosen answers, in answer order.
    pub answers: Vec<String>,
    /// Elapsed seconds for the run.
    #[serde(default)]
    pub time_taken: f64,
    /// Append the outcome to the history log.
    #[serde(default = "default_record")]
    pub record: bool,
}

fn default_record() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    #[serde(flatten)]
    pub outcome: QuizOutcome,
    /// Whether the outcome made it into the history log.
    pub recorded: bool,
}

/// Score a quiz run and optionally record it.
pub async fn submit_result(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Json(request): Json<ResultRequest>,
) -> Result<Json<ResultResponse>, ApiError> {
    let kind = resolve(&identifier)?;
    let categories = request
        .answers
        .iter()
        .map(|tag| tag.parse::<Category>())
        .collect::<Result<Vec<_>, _>>()?;

    let category = compute_result_from_categories(&categories, kind)?;
    let outcome = QuizOutcome::new(category);
    info!(quiz = %kind, result = %category, votes = categories.len(), "quiz scored");

    let recorded = if request.record {
        let record = outcome.to_record(Utc::now(), request.time_taken.max(0.0));
        // A lost history entry does not invalidate the result.
        match state.store().append(record) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, quiz = %kind, "result not recorded");
                false
            }
        }
    } else {
        false
    };

    Ok(Json(ResultResponse { outcome, recorded }))
}

/// Accepts `animal-quiz` as well as the short `animal`.
fn resolve(identifier: &str) -> Result<QuizKind, ApiError> {
    Ok(identifier.parse::<QuizKind>()?)
}
