use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::i18n::{self, catalog::LANGUAGES};
use crate::state::AppState;
use crate::ui::{NavState, Section, UiState};
use crate::view::{editor_page, PageModel};

use super::page_language;

const EDITOR_SCRIPT: &str = include_str!("../../assets/editor.js");

/// GET /
pub async fn handle_index(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let ui = state.ui.lock().unwrap_or_else(|p| p.into_inner()).clone();
    let ws = state.workspace.lock().await;
    let preview = ws.preview();
    let values = ws.binder().values();
    Html(editor_page(&PageModel {
        doc: ws.document(),
        values: &values,
        score: &preview.score,
        ui: &ui,
        language: page_language(&ws, &headers),
    }))
}

/// GET /assets/editor.js
pub async fn handle_editor_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        EDITOR_SCRIPT,
    )
}

#[derive(Serialize)]
pub struct LanguageResponse {
    pub language: &'static str,
    pub supported: Vec<&'static str>,
}

fn language_response(language: &'static str) -> LanguageResponse {
    LanguageResponse {
        language,
        supported: LANGUAGES.iter().map(|(c, _)| *c).collect(),
    }
}

/// GET /api/v1/language
pub async fn handle_get_language(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<LanguageResponse> {
    let ws = state.workspace.lock().await;
    Json(language_response(page_language(&ws, &headers)))
}

#[derive(Deserialize)]
pub struct ChangeLanguage {
    pub code: String,
}

/// PUT /api/v1/language
pub async fn handle_change_language(
    State(state): State<AppState>,
    Json(req): Json<ChangeLanguage>,
) -> Result<Json<LanguageResponse>, AppError> {
    let ws = state.workspace.lock().await;
    let language = ws
        .language()
        .change_language(&req.code)
        .map_err(|e| anyhow::anyhow!("could not persist language preference: {e}"))?;
    Ok(Json(language_response(language)))
}

/// GET /api/v1/i18n/:code
pub async fn handle_dictionary(Path(code): Path<String>) -> Json<BTreeMap<&'static str, &'static str>> {
    Json(i18n::dictionary(&code).iter().copied().collect())
}

/// GET /api/v1/ui
pub async fn handle_get_ui(State(state): State<AppState>) -> Json<UiState> {
    Json(state.ui.lock().unwrap_or_else(|p| p.into_inner()).clone())
}

/// POST /api/v1/ui/tab/:section
pub async fn handle_switch_tab(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<NavState>, AppError> {
    let section = Section::parse(&section)
        .ok_or_else(|| AppError::NotFound(format!("Unknown section '{section}'")))?;
    let mut ui = state.ui.lock().unwrap_or_else(|p| p.into_inner());
    ui.nav.switch_tab(section);
    Ok(Json(ui.nav.clone()))
}
