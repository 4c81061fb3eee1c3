//! Axum route handlers for the job listing.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::listing::age::job_age_label;
use crate::listing::board::{join_refresh, start_refresh, JobBoard};
use crate::listing::filter::{FilterPatch, JobFilters};
use crate::models::job::Job;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub posted_ago: String,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobView>,
    pub total: usize,
    pub filters: JobFilters,
    pub has_active_filters: bool,
    pub locations: Vec<String>,
    pub is_refreshing: bool,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: &'static str,
}

fn list_response(board: &JobBoard) -> JobListResponse {
    let now = Utc::now();
    let jobs: Vec<JobView> = board
        .visible(now)
        .into_iter()
        .map(|job| JobView {
            posted_ago: job_age_label(job, now),
            job: job.clone(),
        })
        .collect();

    JobListResponse {
        total: jobs.len(),
        jobs,
        filters: board.filters().clone(),
        has_active_filters: board.filters().is_active(),
        locations: board.locations().to_vec(),
        is_refreshing: board.is_refreshing(),
    }
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    let board = state.board.read().await;
    Json(list_response(&board))
}

/// PATCH /api/v1/jobs/filters
///
/// Missing fields are left alone, empty strings unset a filter.
pub async fn handle_update_filters(
    State(state): State<AppState>,
    Json(patch): Json<FilterPatch>,
) -> Result<Json<JobListResponse>, AppError> {
    let mut board = state.board.write().await;
    board.update_filters(patch)?;
    Ok(Json(list_response(&board)))
}

/// DELETE /api/v1/jobs/filters
pub async fn handle_clear_filters(State(state): State<AppState>) -> Json<JobListResponse> {
    let mut board = state.board.write().await;
    board.clear_filters();
    Json(list_response(&board))
}

/// POST /api/v1/jobs/refresh
///
/// Fire-and-forget: the reorder lands after the configured delay.
pub async fn handle_refresh(
    State(state): State<AppState>,
) -> (StatusCode, Json<RefreshResponse>) {
    // completion is observed through `is_refreshing` on the listing
    let task = start_refresh(&state.board, state.config.refresh_delay).await;
    tokio::spawn(join_refresh(task));
    (
        StatusCode::ACCEPTED,
        Json(RefreshResponse {
            status: "refreshing",
        }),
    )
}
