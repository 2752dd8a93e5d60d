//! Field binder: keeps bound form inputs and the store in sync.
//!
//! Inputs are addressed by dotted paths (`personal.email`, `skills`, `resumeTitle`).
//! Every input commits synchronously; the displayed values are re-read from the store on
//! every notification so external mutations show up in the inputs.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::{Document, PartialDocument, PERSONAL_TEXT_FIELDS};
use crate::store::{DocumentStore, PersistOutcome};

#[derive(Debug, Error, PartialEq)]
pub enum BindError {
    #[error("unknown field path '{0}'")]
    UnknownPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Personal(&'static str),
    Skills,
    ResumeTitle,
}

impl FromStr for FieldPath {
    type Err = BindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once('.') {
            Some(("personal", key)) => PERSONAL_TEXT_FIELDS
                .iter()
                .find(|k| **k == key)
                .map(|k| FieldPath::Personal(*k))
                .ok_or_else(|| BindError::UnknownPath(raw.to_string())),
            None if raw == "skills" => Ok(FieldPath::Skills),
            None if raw == "resumeTitle" => Ok(FieldPath::ResumeTitle),
            _ => Err(BindError::UnknownPath(raw.to_string())),
        }
    }
}

impl FieldPath {
    pub fn as_path(&self) -> String {
        match self {
            FieldPath::Personal(key) => format!("personal.{key}"),
            FieldPath::Skills => "skills".to_string(),
            FieldPath::ResumeTitle => "resumeTitle".to_string(),
        }
    }

    fn read<'a>(&self, doc: &'a Document) -> &'a str {
        match self {
            FieldPath::Personal(key) => doc.personal.field(key).unwrap_or(""),
            FieldPath::Skills => &doc.skills,
            FieldPath::ResumeTitle => &doc.resume_title,
        }
    }

    /// Builds the replacement value for this field's top-level key.
    fn update(&self, doc: &Document, value: String) -> PartialDocument {
        match self {
            FieldPath::Personal(key) => {
                let personal = doc
                    .personal
                    .with_field(key, value)
                    .unwrap_or_else(|| doc.personal.clone());
                PartialDocument::personal(personal)
            }
            FieldPath::Skills => PartialDocument::skills(value),
            FieldPath::ResumeTitle => PartialDocument {
                resume_title: Some(value),
                ..Default::default()
            },
        }
    }
}

fn bound_paths() -> impl Iterator<Item = FieldPath> {
    PERSONAL_TEXT_FIELDS
        .iter()
        .map(|k| FieldPath::Personal(*k))
        .chain([FieldPath::Skills, FieldPath::ResumeTitle])
}

fn snapshot(doc: &Document) -> BTreeMap<String, String> {
    bound_paths()
        .map(|p| (p.as_path(), p.read(doc).to_string()))
        .collect()
}

/// Displayed values of every bound input, shared with the store subscription.
#[derive(Clone, Default)]
pub struct FieldBinder {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FieldBinder {
    /// Creates a binder showing the store's current values and subscribed to its changes.
    pub fn attach(store: &mut DocumentStore) -> Self {
        let binder = Self::default();
        binder.sync(store.get_state());
        let values = binder.values.clone();
        store.subscribe(Box::new(move |doc| {
            *values.lock().unwrap_or_else(|p| p.into_inner()) = snapshot(doc);
        }));
        binder
    }

    fn sync(&self, doc: &Document) {
        *self.values.lock().unwrap_or_else(|p| p.into_inner()) = snapshot(doc);
    }

    /// One input event: overwrite the field and commit immediately.
    pub fn input(
        &self,
        store: &mut DocumentStore,
        path: &str,
        value: String,
    ) -> Result<PersistOutcome, BindError> {
        let path: FieldPath = path.parse()?;
        let update = path.update(store.get_state(), value);
        Ok(store.set_state(update))
    }

    pub fn values(&self) -> BTreeMap<String, String> {
        self.values.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;

    fn setup() -> (DocumentStore, FieldBinder) {
        let mut store = DocumentStore::load(Arc::new(MemoryStorage::new()));
        let binder = FieldBinder::attach(&mut store);
        (store, binder)
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!("personal.email".parse::<FieldPath>(), Ok(FieldPath::Personal("email")));
        assert_eq!("skills".parse::<FieldPath>(), Ok(FieldPath::Skills));
        assert_eq!("resumeTitle".parse::<FieldPath>(), Ok(FieldPath::ResumeTitle));
        assert!("personal.photo".parse::<FieldPath>().is_err());
        assert!("experience.0.role".parse::<FieldPath>().is_err());
    }

    #[test]
    fn test_input_overwrites_only_that_key() {
        let (mut store, binder) = setup();
        let before = store.get_state().personal.clone();
        binder
            .input(&mut store, "personal.email", "new@example.com".to_string())
            .unwrap();
        let after = &store.get_state().personal;
        assert_eq!(after.email, "new@example.com");
        assert_eq!(after.full_name, before.full_name);
        assert_eq!(after.phone, before.phone);
    }

    #[test]
    fn test_every_keystroke_commits() {
        let (mut store, binder) = setup();
        for partial in ["R", "Ru", "Rus", "Rust"] {
            binder.input(&mut store, "skills", partial.to_string()).unwrap();
            assert_eq!(store.get_state().skills, partial);
        }
    }

    #[test]
    fn test_values_resync_after_external_mutation() {
        let (mut store, binder) = setup();
        assert_eq!(binder.values()["personal.fullName"], "John Doe");

        let mut personal = store.get_state().personal.clone();
        personal.full_name = "Grace Hopper".to_string();
        store.set_state(PartialDocument::personal(personal));

        assert_eq!(binder.values()["personal.fullName"], "Grace Hopper");
    }

    #[test]
    fn test_unknown_path_is_rejected_without_mutation() {
        let (mut store, binder) = setup();
        let before = store.get_state().clone();
        let err = binder
            .input(&mut store, "personal.nickname", "x".to_string())
            .unwrap_err();
        assert_eq!(err, BindError::UnknownPath("personal.nickname".to_string()));
        assert_eq!(*store.get_state(), before);
    }
}
