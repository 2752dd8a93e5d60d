use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

use crate::config::Config;
use crate::editor::Workspace;
use crate::export::DocumentExporter;
use crate::score::ScoreBoost;
use crate::share::ShareBackend;
use crate::store::storage::KeyValueStore;
use crate::ui::{SharedUi, UiState};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editing session. Never hold the lock across an external await.
    pub workspace: Arc<AsyncMutex<Workspace>>,
    pub ui: SharedUi,
    pub config: Config,
    /// Pluggable export backend. Default: PrintableHtmlExporter.
    pub exporter: Arc<dyn DocumentExporter>,
    /// Pluggable share backend. Default: SupabaseShareBackend.
    pub share: Arc<dyn ShareBackend>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        exporter: Arc<dyn DocumentExporter>,
        share: Arc<dyn ShareBackend>,
    ) -> Self {
        let boost = if config.score_boost {
            ScoreBoost::default()
        } else {
            ScoreBoost::disabled()
        };
        Self {
            workspace: Arc::new(AsyncMutex::new(Workspace::open(storage, boost))),
            ui: Arc::new(Mutex::new(UiState::new(config.nav_toggle_closes))),
            config,
            exporter,
            share,
        }
    }
}
