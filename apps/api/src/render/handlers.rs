//! Axum route handlers for document export.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::models::TailoredResume;
use crate::render::{export_filename, render, ExportFormat};
use crate::state::AppState;

/// POST /api/v1/export/:format
///
/// Renders a resume supplied in the body, typically one the client has edited.
pub async fn handle_export(
    Path(format): Path<String>,
    Json(resume): Json<TailoredResume>,
) -> Result<Response, AppError> {
    let format: ExportFormat = format.parse()?;
    document_response(&resume, format)
}

/// GET /api/v1/history/:index/export/:format
pub async fn handle_export_history_entry(
    State(state): State<AppState>,
    Path((index, format)): Path<(usize, String)>,
) -> Result<Response, AppError> {
    let format: ExportFormat = format.parse()?;
    let entry = state.history.get(index).await?;
    document_response(&entry.resume, format)
}

fn document_response(resume: &TailoredResume, format: ExportFormat) -> Result<Response, AppError> {
    let body = Bytes::from(render(resume, format)?);
    let filename = export_filename(resume, format);
    info!("Exported {filename} ({} bytes)", body.len());

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}
