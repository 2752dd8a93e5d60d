use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::editor::lists::ListEntry;
use crate::errors::AppError;
use crate::i18n;
use crate::state::AppState;
use crate::view::{forms, Node};

use super::document::MutationResponse;
use super::page_language;

#[derive(Serialize)]
pub struct AddedResponse {
    pub id: i64,
    #[serde(flatten)]
    pub mutation: MutationResponse,
}

/// POST /api/v1/{experience,education}
pub async fn handle_add<E: ListEntry + Send + 'static>(
    State(state): State<AppState>,
) -> (StatusCode, Json<AddedResponse>) {
    let mut ws = state.workspace.lock().await;
    let (id, outcome) = ws.add::<E>();
    (
        StatusCode::CREATED,
        Json(AddedResponse {
            id,
            mutation: MutationResponse::new(&ws, &outcome),
        }),
    )
}

/// DELETE /api/v1/{experience,education}/:id
pub async fn handle_remove<E: ListEntry + Send + 'static>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<MutationResponse> {
    let mut ws = state.workspace.lock().await;
    let outcome = ws.remove::<E>(id);
    Json(MutationResponse::new(&ws, &outcome))
}

#[derive(Deserialize)]
pub struct EntryUpdate {
    pub field: String,
    pub value: String,
}

/// PATCH /api/v1/{experience,education}/:index
pub async fn handle_update<E: ListEntry + Send + 'static>(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<EntryUpdate>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut ws = state.workspace.lock().await;
    let outcome = ws.update::<E>(index, &req.field, req.value)?;
    Ok(Json(MutationResponse::new(&ws, &outcome)))
}

fn localized(mut node: Node, language: &str) -> Html<String> {
    i18n::localize(&mut node, language);
    Html(node.render())
}

/// GET /api/v1/experience/editor
pub async fn handle_experience_editor(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    let ws = state.workspace.lock().await;
    localized(forms::experience_editor(ws.document()), page_language(&ws, &headers))
}

/// GET /api/v1/education/editor
pub async fn handle_education_editor(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    let ws = state.workspace.lock().await;
    localized(forms::education_editor(ws.document()), page_language(&ws, &headers))
}

/// GET /api/v1/experience/:index/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let ws = state.workspace.lock().await;
    let entry = ws
        .document()
        .experience
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("No experience entry at position {index}")))?;
    Ok(localized(
        forms::suggestion_list(index, &entry.role),
        page_language(&ws, &headers),
    ))
}

#[derive(Deserialize)]
pub struct ApplySuggestion {
    pub line: String,
}

/// POST /api/v1/experience/:index/suggestions
pub async fn handle_apply_suggestion(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<ApplySuggestion>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut ws = state.workspace.lock().await;
    let outcome = ws.apply_suggestion(index, &req.line)?;
    Ok(Json(MutationResponse::new(&ws, &outcome)))
}
