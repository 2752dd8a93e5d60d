//! Document store, the single owner of the résumé document.
//!
//! Every `set_state` merges shallowly, persists the whole document synchronously and then
//! notifies subscribers in registration order. A failed write never loses the in-memory
//! edit; it is reported back as a [`PersistOutcome`].

pub mod migrate;
pub mod storage;

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::models::{Document, PartialDocument};
use storage::{KeyValueStore, DOCUMENT_SLOT};

pub const QUOTA_WARNING: &str = "⚠️ Storage Full! Your CV is too large (likely due to the photo). \
Please upload a smaller photo or remove it to save changes.";

pub type Listener = Box<dyn FnMut(&Document) + Send>;

/// Result of persisting after a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    Saved,
    QuotaExceeded,
    Failed(String),
}

impl PersistOutcome {
    /// User-facing warning, only for failures that look quota related.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            PersistOutcome::QuotaExceeded => Some(QUOTA_WARNING),
            _ => None,
        }
    }
}

pub struct DocumentStore {
    state: Document,
    listeners: Vec<Listener>,
    storage: Arc<dyn KeyValueStore>,
}

/// Reads the document slot through the migrate path. Unreadable content is dropped from
/// storage and the sample document is used instead.
fn read_persisted(storage: &dyn KeyValueStore) -> Document {
    let raw = storage.get(DOCUMENT_SLOT).unwrap_or_else(|e| {
        warn!("Could not read persisted document: {e}");
        None
    });
    match migrate::load(raw.as_deref()) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Discarding unreadable persisted document: {e}");
            if let Err(e) = storage.remove(DOCUMENT_SLOT) {
                warn!("Could not clear unreadable document slot: {e}");
            }
            Document::sample()
        }
    }
}

impl DocumentStore {
    /// Loads the persisted document through the migrate path, or the sample document.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let state = read_persisted(storage.as_ref());
        info!(
            "Document loaded: {} experience, {} education entries",
            state.experience.len(),
            state.education.len()
        );
        Self {
            state,
            listeners: Vec::new(),
            storage,
        }
    }

    pub fn get_state(&self) -> &Document {
        &self.state
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn set_state(&mut self, partial: PartialDocument) -> PersistOutcome {
        self.state = partial.merge_into(&self.state);
        let outcome = self.persist();
        self.notify();
        outcome
    }

    /// Replaces the in-memory document with whatever is persisted.
    pub fn reload(&mut self) {
        self.state = read_persisted(self.storage.as_ref());
        self.notify();
    }

    /// Writes the current document without changing it.
    pub fn persist(&self) -> PersistOutcome {
        let encoded = match migrate::encode(&self.state) {
            Ok(s) => s,
            Err(e) => {
                error!("Storage error: could not encode document: {e}");
                return PersistOutcome::Failed(e.to_string());
            }
        };
        match self.storage.set(DOCUMENT_SLOT, &encoded) {
            Ok(()) => PersistOutcome::Saved,
            Err(e) if e.is_quota() => {
                error!("Storage error: {e}");
                PersistOutcome::QuotaExceeded
            }
            Err(e) => {
                error!("Storage error: {e}");
                PersistOutcome::Failed(e.to_string())
            }
        }
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceEntry, TemplateId};
    use std::sync::Mutex;
    use storage::MemoryStorage;

    fn store_with(storage: Arc<dyn KeyValueStore>) -> DocumentStore {
        DocumentStore::load(storage)
    }

    #[test]
    fn test_set_state_keeps_unrelated_keys() {
        let mut store = store_with(Arc::new(MemoryStorage::new()));
        let before = store.get_state().clone();
        store.set_state(PartialDocument::skills("x".to_string()));
        let after = store.get_state();
        assert_eq!(after.skills, "x");
        assert_eq!(after.personal, before.personal);
        assert_eq!(after.experience, before.experience);
        assert_eq!(after.education, before.education);
    }

    #[test]
    fn test_set_state_persists_before_notifying() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store_with(storage.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let probe_storage = storage.clone();
        let seen_in = seen.clone();
        store.subscribe(Box::new(move |doc| {
            let persisted = probe_storage.get(DOCUMENT_SLOT).unwrap().unwrap_or_default();
            seen_in
                .lock()
                .unwrap()
                .push((doc.template, persisted.contains("executive")));
        }));

        let outcome = store.set_state(PartialDocument::template(TemplateId::Executive));
        assert_eq!(outcome, PersistOutcome::Saved);
        assert_eq!(*seen.lock().unwrap(), vec![(TemplateId::Executive, true)]);
    }

    #[test]
    fn test_listeners_notified_in_registration_order() {
        let mut store = store_with(Arc::new(MemoryStorage::new()));
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["binder", "preview", "score"] {
            let order = order.clone();
            store.subscribe(Box::new(move |_| order.lock().unwrap().push(tag)));
        }
        store.set_state(PartialDocument::skills("Rust".to_string()));
        assert_eq!(*order.lock().unwrap(), vec!["binder", "preview", "score"]);
    }

    #[test]
    fn test_quota_failure_keeps_edit_and_warns() {
        let mut store = store_with(Arc::new(MemoryStorage::with_quota(2048)));
        let notified = Arc::new(Mutex::new(0));
        let counter = notified.clone();
        store.subscribe(Box::new(move |_| *counter.lock().unwrap() += 1));

        let mut personal = store.get_state().personal.clone();
        personal.photo = Some(format!("data:image/jpeg;base64,{}", "A".repeat(4096)));
        let outcome = store.set_state(PartialDocument::personal(personal));

        assert_eq!(outcome, PersistOutcome::QuotaExceeded);
        assert!(outcome.warning().unwrap().contains("photo"));
        assert!(store.get_state().personal.photo.is_some());
        assert_eq!(*notified.lock().unwrap(), 1);
    }

    #[test]
    fn test_reload_reads_persisted_state() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let mut first = store_with(storage.clone());
        first.set_state(PartialDocument::experience(vec![ExperienceEntry {
            id: 42,
            company: "Acme".to_string(),
            ..Default::default()
        }]));

        let mut second = store_with(storage);
        assert_eq!(second.get_state().experience[0].id, 42);
        second.reload();
        assert_eq!(second.get_state(), first.get_state());
    }

    #[test]
    fn test_unreadable_slot_falls_back_to_sample() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(DOCUMENT_SLOT, "\u{0}garbage").unwrap();
        let store = store_with(storage.clone());
        assert_eq!(*store.get_state(), Document::sample());
        assert_eq!(storage.get(DOCUMENT_SLOT).unwrap(), None, "unreadable slot is discarded");
    }
}
