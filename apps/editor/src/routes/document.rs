use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::editor::{Preview, Workspace};
use crate::errors::AppError;
use crate::models::{Document, PartialDocument, TemplateId};
use crate::score::ScoreReport;
use crate::state::AppState;
use crate::store::PersistOutcome;

/// Body of every mutation response: the new document plus a storage warning, if any.
#[derive(Serialize)]
pub struct MutationResponse {
    pub document: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

impl MutationResponse {
    pub fn new(ws: &Workspace, outcome: &PersistOutcome) -> Self {
        Self {
            document: ws.document().clone(),
            warning: outcome.warning(),
        }
    }
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<Document> {
    Json(state.workspace.lock().await.document().clone())
}

/// PATCH /api/v1/document
pub async fn handle_patch_document(
    State(state): State<AppState>,
    Json(partial): Json<PartialDocument>,
) -> Result<Json<MutationResponse>, AppError> {
    if partial.is_empty() {
        return Err(AppError::Validation("no document keys to update".to_string()));
    }
    let mut ws = state.workspace.lock().await;
    let outcome = ws.set_state(partial);
    Ok(Json(MutationResponse::new(&ws, &outcome)))
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub saved: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

/// POST /api/v1/document/save
pub async fn handle_save(State(state): State<AppState>) -> Json<SaveResponse> {
    let outcome = state.workspace.lock().await.save();
    let saved = outcome == PersistOutcome::Saved;
    Json(SaveResponse {
        saved,
        message: if saved {
            "✅ CV saved locally!"
        } else {
            "CV could not be saved."
        },
        warning: outcome.warning(),
    })
}

/// POST /api/v1/document/reload
pub async fn handle_reload(State(state): State<AppState>) -> Json<Document> {
    let mut ws = state.workspace.lock().await;
    ws.reload();
    Json(ws.document().clone())
}

/// GET /api/v1/fields
pub async fn handle_get_fields(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    Json(state.workspace.lock().await.binder().values())
}

#[derive(Deserialize)]
pub struct FieldInput {
    pub path: String,
    pub value: String,
}

/// POST /api/v1/fields
pub async fn handle_field_input(
    State(state): State<AppState>,
    Json(req): Json<FieldInput>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut ws = state.workspace.lock().await;
    let outcome = ws.input(&req.path, req.value)?;
    Ok(Json(MutationResponse::new(&ws, &outcome)))
}

#[derive(Deserialize)]
pub struct AddSkill {
    pub skill: String,
}

#[derive(Serialize)]
pub struct AddSkillResponse {
    pub added: bool,
    #[serde(flatten)]
    pub mutation: MutationResponse,
}

/// POST /api/v1/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<AddSkill>,
) -> Json<AddSkillResponse> {
    let mut ws = state.workspace.lock().await;
    let outcome = ws.add_skill(&req.skill);
    let added = outcome.is_some();
    let outcome = outcome.unwrap_or(PersistOutcome::Saved);
    Json(AddSkillResponse {
        added,
        mutation: MutationResponse::new(&ws, &outcome),
    })
}

#[derive(Deserialize)]
pub struct SelectTemplate {
    pub template: TemplateId,
}

/// PUT /api/v1/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    Json(req): Json<SelectTemplate>,
) -> Json<MutationResponse> {
    let mut ws = state.workspace.lock().await;
    let outcome = ws.select_template(req.template);
    Json(MutationResponse::new(&ws, &outcome))
}

/// GET /api/v1/preview
pub async fn handle_preview(State(state): State<AppState>) -> Json<Preview> {
    Json(state.workspace.lock().await.preview())
}

/// GET /api/v1/score
pub async fn handle_score(State(state): State<AppState>) -> Json<ScoreReport> {
    Json(state.workspace.lock().await.preview().score)
}
