use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::export::ExportOptions;
use crate::photo::{self, PhotoError};
use crate::share::{base_from_page_url, share_link};
use crate::state::AppState;
use crate::ui::{ActionOutcome, BusyGuard, UiAction};

use super::document::MutationResponse;

/// Records the outcome of a guarded action before the guard restores the busy flag.
fn settle<T>(guard: &BusyGuard, result: Result<T, AppError>, done: &str) -> Result<T, AppError> {
    match &result {
        Ok(_) => guard.finish(ActionOutcome::Succeeded(done.to_string())),
        Err(e) => guard.finish(ActionOutcome::Failed(e.to_string())),
    }
    result
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PhotoRejected(PhotoError::TooLarge { bytes: 0 })
    } else {
        AppError::Validation(format!("Invalid upload: {e}"))
    }
}

async fn read_photo_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("photo") || field.file_name().is_some() {
            return field.bytes().await.map_err(multipart_error);
        }
    }
    Err(AppError::Validation("Missing 'photo' file field".to_string()))
}

/// POST /api/v1/photo (multipart, field `photo`)
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MutationResponse>, AppError> {
    let guard = BusyGuard::enter(&state.ui, UiAction::PhotoUpload);
    let result = async {
        let bytes = read_photo_field(&mut multipart).await?;
        let data_uri = tokio::task::spawn_blocking(move || photo::process_upload(&bytes))
            .await
            .map_err(|e| anyhow::anyhow!("photo task failed: {e}"))??;

        let mut ws = state.workspace.lock().await;
        let outcome = ws.set_photo(data_uri);
        Ok::<_, AppError>(Json(MutationResponse::new(&ws, &outcome)))
    }
    .await;
    settle(&guard, result, "Photo updated")
}

/// DELETE /api/v1/photo
pub async fn handle_remove_photo(State(state): State<AppState>) -> Json<MutationResponse> {
    let mut ws = state.workspace.lock().await;
    let outcome = ws.remove_photo();
    Json(MutationResponse::new(&ws, &outcome))
}

/// POST /api/v1/export
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let guard = BusyGuard::enter(&state.ui, UiAction::Export);
    let (doc, markup) = {
        let ws = state.workspace.lock().await;
        (ws.document().clone(), ws.preview().markup)
    };

    let result = state
        .exporter
        .export(&doc, &markup, &ExportOptions::default())
        .await
        .map_err(AppError::from);
    let file = settle(&guard, result, "Exported")?;

    info!(
        "Exported {} ({} bytes) via {}",
        file.filename,
        file.bytes.len(),
        state.exporter.backend_name()
    );
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ShareRequest {
    /// The editor page URL as seen by the browser.
    pub page_url: Option<String>,
}

#[derive(Serialize)]
pub struct ShareResponse {
    pub id: String,
    pub link: String,
}

/// POST /api/v1/share
pub async fn handle_share(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ShareRequest>,
) -> Result<Json<ShareResponse>, AppError> {
    let guard = BusyGuard::enter(&state.ui, UiAction::Share);
    let doc = state.workspace.lock().await.document().clone();

    let result = state.share.insert(&doc).await.map_err(AppError::from);
    let id = settle(&guard, result, "Link created")?;

    let referer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());
    let base = req
        .page_url
        .as_deref()
        .or(referer)
        .and_then(base_from_page_url)
        .unwrap_or_else(|| state.config.public_base_url.clone());

    let link = share_link(&base, &id);
    info!("Share link created: {link}");
    Ok(Json(ShareResponse { id, link }))
}
