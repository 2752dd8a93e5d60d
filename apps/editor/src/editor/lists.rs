//! CRUD over the experience and education collections.
//!
//! Removal is keyed by the entry's `id`; in-place edits are keyed by position. Every
//! operation hands the store a full replacement collection.

use std::collections::HashSet;

use chrono::Utc;
use thiserror::Error;

use crate::models::{Document, EducationEntry, ExperienceEntry, PartialDocument};
use crate::store::{DocumentStore, PersistOutcome};

#[derive(Debug, Error, PartialEq)]
pub enum ListError {
    #[error("no {section} entry at position {index}")]
    NoEntryAt { section: &'static str, index: usize },

    #[error("{section} entries have no field '{field}'")]
    UnknownField { section: &'static str, field: String },
}

/// An entry type stored as an ordered collection inside the document.
pub trait ListEntry: Clone + Sized {
    const SECTION: &'static str;
    /// Editable string fields, in form order.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> i64;
    fn placeholder(id: i64) -> Self;
    fn field(&self, name: &str) -> Option<&str>;
    fn set_field(&mut self, name: &str, value: String) -> bool;
    fn collection(doc: &Document) -> &[Self];
    fn replace(entries: Vec<Self>) -> PartialDocument;
}

impl ListEntry for ExperienceEntry {
    const SECTION: &'static str = "experience";
    const FIELDS: &'static [&'static str] = &[
        "company",
        "role",
        "location",
        "startDate",
        "endDate",
        "description",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn placeholder(id: i64) -> Self {
        ExperienceEntry {
            id,
            company: "New Company".to_string(),
            role: "Job Title".to_string(),
            ..Default::default()
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "company" => Some(&self.company),
            "role" => Some(&self.role),
            "location" => Some(&self.location),
            "startDate" => Some(&self.start_date),
            "endDate" => Some(&self.end_date),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "company" => &mut self.company,
            "role" => &mut self.role,
            "location" => &mut self.location,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "description" => &mut self.description,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn collection(doc: &Document) -> &[Self] {
        &doc.experience
    }

    fn replace(entries: Vec<Self>) -> PartialDocument {
        PartialDocument::experience(entries)
    }
}

impl ListEntry for EducationEntry {
    const SECTION: &'static str = "education";
    const FIELDS: &'static [&'static str] =
        &["school", "degree", "location", "startDate", "endDate"];

    fn id(&self) -> i64 {
        self.id
    }

    fn placeholder(id: i64) -> Self {
        EducationEntry {
            id,
            school: "New School".to_string(),
            degree: "Degree".to_string(),
            ..Default::default()
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "school" => Some(&self.school),
            "degree" => Some(&self.degree),
            "location" => Some(&self.location),
            "startDate" => Some(&self.start_date),
            "endDate" => Some(&self.end_date),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "school" => &mut self.school,
            "degree" => &mut self.degree,
            "location" => &mut self.location,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn collection(doc: &Document) -> &[Self] {
        &doc.education
    }

    fn replace(entries: Vec<Self>) -> PartialDocument {
        PartialDocument::education(entries)
    }
}

/// Issues entry ids: wall-clock milliseconds, bumped so they are strictly increasing
/// and never collide with an id already in the document.
#[derive(Debug)]
pub struct EntryIds {
    last: i64,
}

impl EntryIds {
    pub fn seeded_from(doc: &Document) -> Self {
        let mut ids = Self { last: 0 };
        ids.observe(doc);
        ids
    }

    /// Raises the floor so ids already present in `doc` are never issued again.
    pub fn observe(&mut self, doc: &Document) {
        let max = entry_ids(doc).max().unwrap_or(0);
        self.last = self.last.max(max);
    }

    /// Next id for a new entry of `doc`. Once the counter is exhausted (a document carrying
    /// `i64::MAX`), falls back to the lowest positive id `doc` does not use.
    pub fn next(&mut self, doc: &Document) -> i64 {
        match self.last.checked_add(1) {
            Some(bumped) => {
                self.last = Utc::now().timestamp_millis().max(bumped);
                self.last
            }
            None => {
                let used: HashSet<i64> = entry_ids(doc).collect();
                (1..).find(|id| !used.contains(id)).unwrap_or(1)
            }
        }
    }
}

fn entry_ids(doc: &Document) -> impl Iterator<Item = i64> + '_ {
    doc.experience
        .iter()
        .map(|e| e.id)
        .chain(doc.education.iter().map(|e| e.id))
}

pub fn add<E: ListEntry>(store: &mut DocumentStore, ids: &mut EntryIds) -> (i64, PersistOutcome) {
    let id = ids.next(store.get_state());
    let mut entries = E::collection(store.get_state()).to_vec();
    entries.push(E::placeholder(id));
    (id, store.set_state(E::replace(entries)))
}

/// Drops the entry with `id`. An unknown id leaves the collection as it was.
pub fn remove<E: ListEntry>(store: &mut DocumentStore, id: i64) -> PersistOutcome {
    let entries: Vec<E> = E::collection(store.get_state())
        .iter()
        .filter(|e| e.id() != id)
        .cloned()
        .collect();
    store.set_state(E::replace(entries))
}

pub fn update<E: ListEntry>(
    store: &mut DocumentStore,
    index: usize,
    field: &str,
    value: String,
) -> Result<PersistOutcome, ListError> {
    let mut entries = E::collection(store.get_state()).to_vec();
    let entry = entries.get_mut(index).ok_or(ListError::NoEntryAt {
        section: E::SECTION,
        index,
    })?;
    if !entry.set_field(field, value) {
        return Err(ListError::UnknownField {
            section: E::SECTION,
            field: field.to_string(),
        });
    }
    Ok(store.set_state(E::replace(entries)))
}
