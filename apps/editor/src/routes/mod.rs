pub mod actions;
pub mod document;
pub mod entries;
pub mod health;
pub mod session;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    routing::{delete, get, post, put},
    Router,
};

use crate::editor::Workspace;
use crate::i18n::resolve_initial_language;
use crate::models::{EducationEntry, ExperienceEntry};
use crate::photo::MAX_UPLOAD_BYTES;
use crate::state::AppState;

/// Multipart framing on top of the largest accepted photo.
const UPLOAD_BODY_SLACK: usize = 64 * 1024;

/// Saved preference, else the browser's `Accept-Language`, else English.
pub(crate) fn page_language(ws: &Workspace, headers: &HeaderMap) -> &'static str {
    let accept = headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
    resolve_initial_language(ws.language().saved(), accept)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Editor page
        .route("/", get(session::handle_index))
        .route("/assets/editor.js", get(session::handle_editor_script))
        // Document store
        .route(
            "/api/v1/document",
            get(document::handle_get_document).patch(document::handle_patch_document),
        )
        .route("/api/v1/document/save", post(document::handle_save))
        .route("/api/v1/document/reload", post(document::handle_reload))
        .route(
            "/api/v1/fields",
            get(document::handle_get_fields).post(document::handle_field_input),
        )
        .route("/api/v1/skills", post(document::handle_add_skill))
        .route("/api/v1/template", put(document::handle_select_template))
        .route("/api/v1/preview", get(document::handle_preview))
        .route("/api/v1/score", get(document::handle_score))
        // List editors; `:slot` is the entry id for DELETE and the position for PATCH
        .route(
            "/api/v1/experience",
            post(entries::handle_add::<ExperienceEntry>),
        )
        .route(
            "/api/v1/experience/editor",
            get(entries::handle_experience_editor),
        )
        .route(
            "/api/v1/experience/:slot",
            delete(entries::handle_remove::<ExperienceEntry>)
                .patch(entries::handle_update::<ExperienceEntry>),
        )
        .route(
            "/api/v1/experience/:slot/suggestions",
            get(entries::handle_suggestions).post(entries::handle_apply_suggestion),
        )
        .route(
            "/api/v1/education",
            post(entries::handle_add::<EducationEntry>),
        )
        .route(
            "/api/v1/education/editor",
            get(entries::handle_education_editor),
        )
        .route(
            "/api/v1/education/:slot",
            delete(entries::handle_remove::<EducationEntry>)
                .patch(entries::handle_update::<EducationEntry>),
        )
        // Collaborators
        .route(
            "/api/v1/photo",
            post(actions::handle_upload_photo)
                .delete(actions::handle_remove_photo)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + UPLOAD_BODY_SLACK)),
        )
        .route("/api/v1/export", post(actions::handle_export))
        .route("/api/v1/share", post(actions::handle_share))
        // Localisation and UI state
        .route(
            "/api/v1/language",
            get(session::handle_get_language).put(session::handle_change_language),
        )
        .route("/api/v1/i18n/:code", get(session::handle_dictionary))
        .route("/api/v1/ui", get(session::handle_get_ui))
        .route("/api/v1/ui/tab/:section", post(session::handle_switch_tab))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::export::{DocumentExporter, ExportError, ExportOptions, ExportedFile, PrintableHtmlExporter};
    use crate::models::Document;
    use crate::share::{ShareBackend, ShareError};
    use crate::store::storage::{KeyValueStore, MemoryStorage};

    struct FailingExporter;

    #[async_trait]
    impl DocumentExporter for FailingExporter {
        async fn export(
            &self,
            _doc: &Document,
            _markup: &str,
            _options: &ExportOptions,
        ) -> Result<ExportedFile, ExportError> {
            Err(ExportError::Render("renderer crashed".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    #[derive(Default)]
    struct RecordingShare {
        shared: Mutex<Vec<Document>>,
    }

    #[async_trait]
    impl ShareBackend for RecordingShare {
        async fn insert(&self, doc: &Document) -> Result<String, ShareError> {
            let mut shared = self.shared.lock().unwrap();
            shared.push(doc.clone());
            Ok(format!("rec-{}", shared.len()))
        }
    }

    struct UnconfiguredShare;

    #[async_trait]
    impl ShareBackend for UnconfiguredShare {
        async fn insert(&self, _doc: &Document) -> Result<String, ShareError> {
            Err(ShareError::ConfigMissing)
        }
    }

    fn config() -> Config {
        Config {
            port: 0,
            rust_log: "info".to_string(),
            data_dir: String::new(),
            storage_quota_bytes: 5 * 1024 * 1024,
            public_base_url: "https://cv.example.com".to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            score_boost: true,
            nav_toggle_closes: true,
        }
    }

    fn state_with(
        storage: Arc<dyn KeyValueStore>,
        exporter: Arc<dyn DocumentExporter>,
        share: Arc<dyn ShareBackend>,
    ) -> AppState {
        AppState::new(config(), storage, exporter, share)
    }

    fn default_state() -> AppState {
        state_with(
            Arc::new(MemoryStorage::new()),
            Arc::new(PrintableHtmlExporter),
            Arc::new(RecordingShare::default()),
        )
    }

    async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = build_router(state.clone()).oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn send_json(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let (status, bytes) = send(state, req).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send_json(&default_state(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_patch_document_merges_shallowly() {
        let state = default_state();
        let (status, body) = send_json(&state, "PATCH", "/api/v1/document", Some(json!({ "skills": "x" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["skills"], "x");
        assert_eq!(body["document"]["personal"]["fullName"], "John Doe");
        assert_eq!(body["document"]["experience"].as_array().unwrap().len(), 1);
        assert!(body.get("warning").is_none());
    }

    #[tokio::test]
    async fn test_field_input_and_unknown_path() {
        let state = default_state();
        let (status, body) = send_json(
            &state,
            "POST",
            "/api/v1/fields",
            Some(json!({ "path": "personal.email", "value": "a@b.c" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["personal"]["email"], "a@b.c");

        let (_, fields) = send_json(&state, "GET", "/api/v1/fields", None).await;
        assert_eq!(fields["personal.email"], "a@b.c");

        let (status, body) = send_json(
            &state,
            "POST",
            "/api/v1/fields",
            Some(json!({ "path": "personal.shoeSize", "value": "44" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_entry_lifecycle() {
        let state = default_state();
        let (status, added) = send_json(&state, "POST", "/api/v1/experience", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = added["id"].as_i64().unwrap();
        assert_eq!(added["document"]["experience"][1]["company"], "New Company");

        let (status, updated) = send_json(
            &state,
            "PATCH",
            "/api/v1/experience/1",
            Some(json!({ "field": "role", "value": "CTO" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["document"]["experience"][1]["role"], "CTO");

        let (status, removed) = send_json(&state, "DELETE", &format!("/api/v1/experience/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["document"]["experience"].as_array().unwrap().len(), 1);

        let (status, _) = send_json(&state, "DELETE", "/api/v1/experience/424242", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send_json(
            &state,
            "PATCH",
            "/api/v1/education/9",
            Some(json!({ "field": "school", "value": "X" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_add_after_patching_max_entry_id() {
        let state = default_state();
        let patch = json!({ "experience": [{
            "id": i64::MAX, "company": "Edge", "role": "", "location": "",
            "startDate": "", "endDate": "", "description": ""
        }] });
        let (status, _) = send_json(&state, "PATCH", "/api/v1/document", Some(patch)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, first) = send_json(&state, "POST", "/api/v1/experience", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, second) = send_json(&state, "POST", "/api/v1/education", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_ne!(first["id"], second["id"]);
        assert_eq!(second["document"]["experience"][0]["id"], i64::MAX);
    }

    #[tokio::test]
    async fn test_suggestions_fragment_and_apply() {
        let state = default_state();
        let (status, html) = send(
            &state,
            Request::builder()
                .uri("/api/v1/experience/0/suggestions")
                .header("accept-language", "de-DE")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains("for Senior Developer,"));
        assert!(html.contains(">Vorschläge<"));

        let (status, body) = send_json(
            &state,
            "POST",
            "/api/v1/experience/0/suggestions",
            Some(json!({ "line": "• Shipped" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["document"]["experience"][0]["description"]
            .as_str()
            .unwrap()
            .ends_with("\n• Shipped"));
    }

    #[tokio::test]
    async fn test_quota_warning_is_returned_with_document() {
        let state = state_with(
            Arc::new(MemoryStorage::with_quota(2048)),
            Arc::new(PrintableHtmlExporter),
            Arc::new(RecordingShare::default()),
        );
        let big = "A".repeat(4096);
        let (status, body) = send_json(&state, "PATCH", "/api/v1/document", Some(json!({ "skills": big }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["skills"].as_str().unwrap().len(), 4096);
        assert!(body["warning"].as_str().unwrap().contains("Storage Full"));
    }

    #[tokio::test]
    async fn test_template_select_and_preview() {
        let state = default_state();
        let (status, _) = send_json(&state, "PUT", "/api/v1/template", Some(json!({ "template": "executive" }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, preview) = send_json(&state, "GET", "/api/v1/preview", None).await;
        assert!(preview["markup"].as_str().unwrap().contains("data-template=\"executive\""));

        let (_, _) = send_json(&state, "PUT", "/api/v1/template", Some(json!({ "template": "neon" }))).await;
        let (_, doc) = send_json(&state, "GET", "/api/v1/document", None).await;
        assert_eq!(doc["template"], "modern");
    }

    #[tokio::test]
    async fn test_add_skill_dedupes() {
        let state = default_state();
        let (_, body) = send_json(&state, "POST", "/api/v1/skills", Some(json!({ "skill": "Rust" }))).await;
        assert_eq!(body["added"], true);
        assert_eq!(body["document"]["skills"], "JavaScript, React, Node.js, Rust");
        let (_, body) = send_json(&state, "POST", "/api/v1/skills", Some(json!({ "skill": "React" }))).await;
        assert_eq!(body["added"], false);
    }

    #[tokio::test]
    async fn test_export_success_and_failure_restore_busy() {
        let state = default_state();
        let (status, bytes) = send(
            &state,
            Request::builder().method("POST").uri("/api/v1/export").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(bytes).unwrap().contains("resume-preview-content"));
        assert!(!state.ui.lock().unwrap().busy);

        let failing = state_with(
            Arc::new(MemoryStorage::new()),
            Arc::new(FailingExporter),
            Arc::new(RecordingShare::default()),
        );
        let (status, body) = send_json(&failing, "POST", "/api/v1/export", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"]["message"],
            "Failed to generate PDF. Please try \"Print to PDF\" instead."
        );
        let ui = failing.ui.lock().unwrap();
        assert!(!ui.busy);
        assert!(ui.last_outcome.is_some());
    }

    #[tokio::test]
    async fn test_share_link_uses_page_url_then_public_base() {
        let state = default_state();
        let (status, body) = send_json(
            &state,
            "POST",
            "/api/v1/share",
            Some(json!({ "pageUrl": "http://localhost:3000/editor/index.html" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["link"], "http://localhost:3000/editor/share.html?id=rec-1");

        let (_, body) = send_json(&state, "POST", "/api/v1/share", Some(json!({}))).await;
        assert_eq!(body["link"], "https://cv.example.com/share.html?id=rec-2");
    }

    #[tokio::test]
    async fn test_share_missing_config_message() {
        let state = state_with(
            Arc::new(MemoryStorage::new()),
            Arc::new(PrintableHtmlExporter),
            Arc::new(UnconfiguredShare),
        );
        let (status, body) = send_json(&state, "POST", "/api/v1/share", Some(json!({}))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["message"], "Configuration missing.");
        assert!(!state.ui.lock().unwrap().busy);
    }

    #[tokio::test]
    async fn test_oversized_photo_rejected_with_message() {
        let state = default_state();
        let boundary = "XBOUNDARY";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"big.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .into_bytes();
        body.extend(std::iter::repeat(0u8).take(MAX_UPLOAD_BYTES + 1));
        body.extend(format!("\r\n--{boundary}--\r\n").into_bytes());

        let (status, bytes) = send(
            &state,
            Request::builder()
                .method("POST")
                .uri("/api/v1/photo")
                .header("content-type", format!("multipart/form-data; boundary={boundary}"))
                .body(Body::from(body))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"]["message"],
            "File size too big. Please choose an image under 4MB."
        );
        let (_, doc) = send_json(&state, "GET", "/api/v1/document", None).await;
        assert!(doc["personal"].get("photo").is_none());
    }

    #[tokio::test]
    async fn test_language_round_trip_and_localised_page() {
        let state = default_state();
        let (_, lang) = send_json(&state, "GET", "/api/v1/language", None).await;
        assert_eq!(lang["language"], "en");

        let (status, lang) = send_json(&state, "PUT", "/api/v1/language", Some(json!({ "code": "fr" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(lang["language"], "fr");

        let (status, html) = send(&state, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains("<html lang=\"fr\">"));
        assert!(html.contains(">Sauvegarder<"));

        let (_, dict) = send_json(&state, "GET", "/api/v1/i18n/pt", None).await;
        assert_eq!(dict["action.save"], "Salvar");
    }

    #[tokio::test]
    async fn test_tab_switching() {
        let state = default_state();
        let (_, nav) = send_json(&state, "POST", "/api/v1/ui/tab/personal", None).await;
        assert_eq!(nav["open"], false);
        let (_, nav) = send_json(&state, "POST", "/api/v1/ui/tab/skills", None).await;
        assert_eq!(nav["active"], "skills");
        assert_eq!(nav["open"], true);
        let (status, _) = send_json(&state, "POST", "/api/v1/ui/tab/bogus", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reload_restores_persisted_document() {
        let state = default_state();
        send_json(&state, "PATCH", "/api/v1/document", Some(json!({ "skills": "Go" }))).await;
        let (_, saved) = send_json(&state, "POST", "/api/v1/document/save", None).await;
        assert_eq!(saved["saved"], true);
        let (_, doc) = send_json(&state, "POST", "/api/v1/document/reload", None).await;
        assert_eq!(doc["skills"], "Go");
    }
}
