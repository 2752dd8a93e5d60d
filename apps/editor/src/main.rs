mod config;
mod editor;
mod errors;
mod export;
mod i18n;
mod models;
mod photo;
mod routes;
mod score;
mod share;
mod state;
mod store;
mod ui;
mod view;

use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::PrintableHtmlExporter;
use crate::routes::build_router;
use crate::share::SupabaseShareBackend;
use crate::state::AppState;
use crate::store::storage::FileStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume editor v{}", env!("CARGO_PKG_VERSION"));

    let storage = Arc::new(FileStorage::open(&config.data_dir, config.storage_quota_bytes)?);
    info!(
        "Local storage at {} ({} byte quota)",
        config.data_dir, config.storage_quota_bytes
    );

    let share = SupabaseShareBackend::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    );
    if config.supabase_url.is_none() || config.supabase_anon_key.is_none() {
        warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set; sharing is disabled");
    }

    let state = AppState::new(
        config.clone(),
        storage,
        Arc::new(PrintableHtmlExporter),
        Arc::new(share),
    );

    let app = build_router(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Turns a handler panic into the standard 500 error body.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": {
                "code": "INTERNAL_ERROR",
                "message": "An internal server error occurred"
            }
        })),
    )
        .into_response()
}
