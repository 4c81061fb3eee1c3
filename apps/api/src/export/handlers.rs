//! Axum route handlers for CV export.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{ExportJob, ExportStatus, ExportTicket, EXPORT_FILENAME};
use crate::render::render_preview;
use crate::state::AppState;

/// POST /api/v1/cv/export
///
/// Snapshots the current preview and exports it in the background.
/// 202 with an export id, or 200 with status `skipped` when export is unavailable.
pub async fn handle_start_export(
    State(state): State<AppState>,
) -> (StatusCode, Json<ExportTicket>) {
    let html = {
        let editor = state.editor.read().await;
        render_preview(editor.document())
    };

    let ticket = state.exports.start(html).await;
    let status = match ticket.status {
        ExportStatus::Skipped => StatusCode::OK,
        _ => StatusCode::ACCEPTED,
    };
    (status, Json(ticket))
}

/// GET /api/v1/cv/export/:id/status
pub async fn handle_export_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExportJob>, AppError> {
    state
        .exports
        .job(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Export {id} not found")))
}

/// GET /api/v1/cv/export/:id
///
/// Downloads the finished PDF as an attachment.
pub async fn handle_download_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let job = state
        .exports
        .job(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Export {id} not found")))?;

    match (job.status, job.pdf) {
        (ExportStatus::Ready, Some(pdf)) => Ok((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILENAME}\""),
                ),
            ],
            pdf,
        )
            .into_response()),
        (ExportStatus::Failed, _) => Err(AppError::Conflict(format!(
            "Export {id} failed: {}",
            job.error.unwrap_or_default()
        ))),
        _ => Err(AppError::Conflict(format!("Export {id} is not ready yet"))),
    }
}
