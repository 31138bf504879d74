//! Axum route handlers for the History API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::HistoryEntry;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHistoryRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
}

/// GET /api/v1/history
pub async fn handle_list_history(State(state): State<AppState>) -> Json<HistoryListResponse> {
    Json(HistoryListResponse {
        entries: state.history.list().await,
    })
}

/// GET /api/v1/history/:index
pub async fn handle_get_history_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<HistoryEntry>, AppError> {
    Ok(Json(state.history.get(index).await?))
}

/// PATCH /api/v1/history/:index
pub async fn handle_update_history_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(request): Json<UpdateHistoryRequest>,
) -> Result<Json<HistoryEntry>, AppError> {
    let entry = state
        .history
        .update_metadata(index, &request.job_title, &request.company)
        .await?;
    Ok(Json(entry))
}

/// DELETE /api/v1/history/:index
pub async fn handle_delete_history_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<HistoryEntry>, AppError> {
    Ok(Json(state.history.delete(index).await?))
}
