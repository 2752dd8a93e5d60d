//! Transient UI state read by the page renderer: busy flag, last action and the nav panel.

use std::sync::{Arc, Mutex};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiAction {
    Export,
    Share,
    Save,
    PhotoUpload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ActionOutcome {
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Personal,
    Experience,
    Education,
    Skills,
    Templates,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Personal,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Templates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Personal => "personal",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Templates => "templates",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavState {
    pub active: Option<Section>,
    pub open: bool,
    /// Clicking the active tab while the panel is open closes it.
    pub toggle_closes: bool,
}

impl NavState {
    pub fn new(toggle_closes: bool) -> Self {
        Self {
            active: Some(Section::Personal),
            open: true,
            toggle_closes,
        }
    }

    pub fn switch_tab(&mut self, section: Section) {
        let same = self.active == Some(section);
        if same && self.open && self.toggle_closes {
            self.active = None;
            self.open = false;
        } else {
            self.active = Some(section);
            self.open = true;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UiState {
    pub busy: bool,
    /// Guarded actions still running; `busy` is true while this is non-zero.
    pub in_flight: usize,
    pub last_action: Option<UiAction>,
    pub last_outcome: Option<ActionOutcome>,
    pub nav: NavState,
}

impl UiState {
    pub fn new(toggle_closes: bool) -> Self {
        Self {
            busy: false,
            in_flight: 0,
            last_action: None,
            last_outcome: None,
            nav: NavState::new(toggle_closes),
        }
    }
}

pub type SharedUi = Arc<Mutex<UiState>>;

/// Marks the UI busy for one async action. The UI stays busy until every guard entered so
/// far has been dropped, in any order and whichever way each action ends.
pub struct BusyGuard {
    ui: SharedUi,
}

impl BusyGuard {
    pub fn enter(ui: &SharedUi, action: UiAction) -> Self {
        {
            let mut state = ui.lock().unwrap_or_else(|p| p.into_inner());
            state.in_flight += 1;
            state.busy = true;
            state.last_action = Some(action);
        }
        Self { ui: ui.clone() }
    }

    pub fn finish(&self, outcome: ActionOutcome) {
        self.ui.lock().unwrap_or_else(|p| p.into_inner()).last_outcome = Some(outcome);
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut state = self.ui.lock().unwrap_or_else(|p| p.into_inner());
        state.in_flight = state.in_flight.saturating_sub(1);
        state.busy = state.in_flight > 0;
    }
}
