//! History log handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::history::{HistoryRecord, Statistics};

use super::super::{error::ApiError, state::AppState};

/// All records, most recent first.
pub async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryRecord>> {
    Json(state.store().get_all())
}

pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.store().clear_all()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete by position in the most-recent-first view.
///
/// Positions past the end, negative or otherwise unparseable, are a no-op.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<StatusCode, ApiError> {
    match index.parse::<usize>() {
        Ok(index) => {
            state.store().delete_at(index)?;
        }
        Err(_) => debug!(index = %index, "ignoring unparseable history index"),
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_latest(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<HistoryRecord>, ApiError> {
    state
        .store()
        .get_latest(&identifier)
        .map(Json)
        .ok_or_else(|| ApiError::no_history(&identifier))
}

pub async fn get_statistics(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.store().get_statistics())
}
