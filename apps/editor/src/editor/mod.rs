//! The editing session: store, binder, list editors and the live preview, owned together.

pub mod binder;
pub mod lists;
pub mod suggestions;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::info;

use crate::i18n::LanguagePreference;
use crate::models::{split_skills, Document, PartialDocument, TemplateId};
use crate::score::{compute_score, ScoreBoost, ScoreReport};
use crate::store::storage::KeyValueStore;
use crate::store::{DocumentStore, PersistOutcome};
use crate::view;

use binder::{BindError, FieldBinder};
use lists::{EntryIds, ListEntry, ListError};

/// Rendered preview markup and score, refreshed on every store notification.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub markup: String,
    pub score: ScoreReport,
}

impl Preview {
    fn of(doc: &Document, boost: &ScoreBoost) -> Self {
        Self {
            markup: view::render_html(doc),
            score: compute_score(doc, boost),
        }
    }
}

/// `skills` with `skill` appended, or `None` when it is empty or already listed.
pub fn with_skill(skills: &str, skill: &str) -> Option<String> {
    let skill = skill.trim();
    if skill.is_empty() || split_skills(skills).contains(&skill) {
        return None;
    }
    let separator = if skills.is_empty() { "" } else { ", " };
    Some(format!("{skills}{separator}{skill}"))
}

pub struct Workspace {
    store: DocumentStore,
    binder: FieldBinder,
    ids: EntryIds,
    language: LanguagePreference,
    preview: Arc<Mutex<Preview>>,
}

impl Workspace {
    pub fn open(storage: Arc<dyn KeyValueStore>, boost: ScoreBoost) -> Self {
        let mut store = DocumentStore::load(storage.clone());
        let ids = EntryIds::seeded_from(store.get_state());

        let preview = Arc::new(Mutex::new(Preview::of(store.get_state(), &boost)));
        let live = preview.clone();
        store.subscribe(Box::new(move |doc| {
            *live.lock().unwrap_or_else(|p| p.into_inner()) = Preview::of(doc, &boost);
        }));
        let binder = FieldBinder::attach(&mut store);

        Self {
            store,
            binder,
            ids,
            language: LanguagePreference::new(storage),
            preview,
        }
    }

    pub fn document(&self) -> &Document {
        self.store.get_state()
    }

    pub fn binder(&self) -> &FieldBinder {
        &self.binder
    }

    pub fn language(&self) -> &LanguagePreference {
        &self.language
    }

    pub fn preview(&self) -> Preview {
        self.preview.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn set_state(&mut self, partial: PartialDocument) -> PersistOutcome {
        let outcome = self.store.set_state(partial);
        self.ids.observe(self.store.get_state());
        outcome
    }

    pub fn input(&mut self, path: &str, value: String) -> Result<PersistOutcome, BindError> {
        self.binder.input(&mut self.store, path, value)
    }

    pub fn add<E: ListEntry>(&mut self) -> (i64, PersistOutcome) {
        lists::add::<E>(&mut self.store, &mut self.ids)
    }

    pub fn remove<E: ListEntry>(&mut self, id: i64) -> PersistOutcome {
        lists::remove::<E>(&mut self.store, id)
    }

    pub fn update<E: ListEntry>(
        &mut self,
        index: usize,
        field: &str,
        value: String,
    ) -> Result<PersistOutcome, ListError> {
        lists::update::<E>(&mut self.store, index, field, value)
    }

    pub fn apply_suggestion(&mut self, index: usize, line: &str) -> Result<PersistOutcome, ListError> {
        suggestions::apply_suggestion(&mut self.store, index, line)
    }

    /// `None` when the skill is already present.
    pub fn add_skill(&mut self, skill: &str) -> Option<PersistOutcome> {
        let skills = with_skill(&self.store.get_state().skills, skill)?;
        Some(self.store.set_state(PartialDocument::skills(skills)))
    }

    pub fn select_template(&mut self, template: TemplateId) -> PersistOutcome {
        self.store.set_state(PartialDocument::template(template))
    }

    pub fn set_photo(&mut self, data_uri: String) -> PersistOutcome {
        let mut personal = self.store.get_state().personal.clone();
        personal.photo = Some(data_uri);
        self.store.set_state(PartialDocument::personal(personal))
    }

    pub fn remove_photo(&mut self) -> PersistOutcome {
        let mut personal = self.store.get_state().personal.clone();
        personal.photo = None;
        self.store.set_state(PartialDocument::personal(personal))
    }

    /// Re-persists the current document.
    pub fn save(&self) -> PersistOutcome {
        let outcome = self.store.persist();
        info!("Explicit save: {outcome:?}");
        outcome
    }

    /// Discards in-memory state in favour of what is persisted.
    pub fn reload(&mut self) {
        self.store.reload();
        self.ids.observe(self.store.get_state());
    }
}
