//! API routes and handlers.

mod history;
mod quiz;

use axum::{
    Router,
    routing::{delete, get, post},
};

use super::state::AppState;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Quiz catalog and scoring
        .route("/api/v1/quizzes", get(quiz::list_quizzes))
        .route("/api/v1/quizzes/{identifier}/questions", get(quiz::get_questions))
        .route("/api/v1/quizzes/{identifier}/result", post(quiz::submit_result))
        // History log
        .route(
            "/api/v1/history",
            get(history::list_history).delete(history::clear_history),
        )
        .route("/api/v1/history/stats", get(history::get_statistics))
        .route("/api/v1/history/latest/{identifier}", get(history::get_latest))
        .route("/api/v1/history/{index}", delete(history::delete_record))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
