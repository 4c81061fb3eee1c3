//! Axum route handlers for the CV builder.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::editor::EditOutcome;
use crate::errors::AppError;
use crate::models::cv::{CvDocument, ItemId, ScalarField, SectionField, SectionKind};
use crate::render::render_preview;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: CvDocument,
    /// Comma-joined skills as shown in the form input.
    pub skills_input: String,
}

impl DocumentResponse {
    fn from_document(document: &CvDocument) -> Self {
        Self {
            skills_input: document.skills_input(),
            document: document.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdateRequest {
    pub field: ScalarField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillsUpdateRequest {
    pub raw: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemFieldUpdateRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ItemAddedResponse {
    pub section: SectionKind,
    pub id: ItemId,
    pub index: usize,
    pub document: CvDocument,
}

#[derive(Debug, Serialize)]
pub struct ItemEditResponse {
    pub applied: bool,
    #[serde(flatten)]
    pub outcome: EditOutcome,
    pub document: CvDocument,
}

fn parse_section(raw: &str) -> Result<SectionKind, AppError> {
    raw.parse::<SectionKind>().map_err(AppError::Validation)
}

fn edit_response(outcome: EditOutcome, document: &CvDocument) -> Json<ItemEditResponse> {
    Json(ItemEditResponse {
        applied: outcome.applied(),
        outcome,
        document: document.clone(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cv
pub async fn handle_get_document(State(state): State<AppState>) -> Json<DocumentResponse> {
    let editor = state.editor.read().await;
    Json(DocumentResponse::from_document(editor.document()))
}

/// POST /api/v1/cv/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<DocumentResponse> {
    let mut editor = state.editor.write().await;
    editor.reset();
    Json(DocumentResponse::from_document(editor.document()))
}

/// PATCH /api/v1/cv/fields
pub async fn handle_update_field(
    State(state): State<AppState>,
    Json(req): Json<FieldUpdateRequest>,
) -> Json<DocumentResponse> {
    let mut editor = state.editor.write().await;
    editor.set_field(req.field, req.value);
    Json(DocumentResponse::from_document(editor.document()))
}

/// PUT /api/v1/cv/skills
pub async fn handle_update_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillsUpdateRequest>,
) -> Json<DocumentResponse> {
    let mut editor = state.editor.write().await;
    editor.set_skills(&req.raw);
    Json(DocumentResponse::from_document(editor.document()))
}

/// POST /api/v1/cv/sections/:section
///
/// Appends a blank item with a fresh id.
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<(StatusCode, Json<ItemAddedResponse>), AppError> {
    let section = parse_section(&section)?;
    let mut editor = state.editor.write().await;
    let id = editor.add_item(section);
    let document = editor.document();
    Ok((
        StatusCode::CREATED,
        Json(ItemAddedResponse {
            section,
            id,
            index: document.section_len(section) - 1,
            document: document.clone(),
        }),
    ))
}

/// PATCH /api/v1/cv/sections/:section/:index
///
/// An index past the end is skipped and reported with `applied: false`.
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((section, index)): Path<(String, usize)>,
    Json(req): Json<ItemFieldUpdateRequest>,
) -> Result<Json<ItemEditResponse>, AppError> {
    let section = parse_section(&section)?;
    let field = SectionField::parse(section, &req.field).ok_or_else(|| {
        AppError::Validation(format!(
            "'{}' is not a field of section '{section}'",
            req.field
        ))
    })?;

    let mut editor = state.editor.write().await;
    let outcome = editor.update_item(index, field, req.value);
    Ok(edit_response(outcome, editor.document()))
}

/// DELETE /api/v1/cv/sections/:section/:index
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((section, index)): Path<(String, usize)>,
) -> Result<Json<ItemEditResponse>, AppError> {
    let section = parse_section(&section)?;
    let mut editor = state.editor.write().await;
    let outcome = editor.remove_item(section, index);
    Ok(edit_response(outcome, editor.document()))
}

/// GET /api/v1/cv/preview
pub async fn handle_preview(State(state): State<AppState>) -> impl IntoResponse {
    let editor = state.editor.read().await;
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        render_preview(editor.document()),
    )
}
