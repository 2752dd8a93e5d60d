//! UI localisation: static dictionaries, tree localisation and the persisted preference.

pub mod catalog;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::store::storage::{KeyValueStore, StorageError, LANGUAGE_SLOT};
use crate::view::node::{text, Node};
use catalog::{Dictionary, DEFAULT_LANGUAGE, LANGUAGES};

/// Canonical supported code for `code`, if any (`"DE"` and `"de-AT"` both give `"de"`).
pub fn supported(code: &str) -> Option<&'static str> {
    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    LANGUAGES
        .iter()
        .map(|(c, _)| *c)
        .find(|c| *c == primary)
}

/// Dictionary for `code`; unknown codes get the default language.
pub fn dictionary(code: &str) -> Dictionary {
    let code = supported(code).unwrap_or(DEFAULT_LANGUAGE);
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, d)| *d)
        .unwrap_or(catalog::EN)
}

fn lookup(dict: Dictionary, key: &str) -> Option<&'static str> {
    dict.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Translation of `key`, falling back to the default language. `None` when no dictionary
/// has the key.
pub fn translate(code: &str, key: &str) -> Option<&'static str> {
    lookup(dictionary(code), key).or_else(|| lookup(catalog::EN, key))
}

/// Rewrites the text of every translation-tagged element. Untranslatable keys leave the
/// element as it was.
pub fn localize(node: &mut Node, code: &str) {
    node.visit_mut(&mut |el| {
        if let Some(value) = el.i18n.and_then(|key| translate(code, key)) {
            el.children = vec![text(value)];
        }
    });
}

/// Saved preference first, then the primary tag of `Accept-Language`, then the default.
pub fn resolve_initial_language(saved: Option<&str>, accept_language: Option<&str>) -> &'static str {
    if let Some(code) = saved.and_then(supported) {
        return code;
    }
    accept_language
        .into_iter()
        .flat_map(|header| header.split(','))
        .map(|part| part.split(';').next().unwrap_or("").trim())
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .find_map(supported)
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// The persisted language choice.
pub struct LanguagePreference {
    storage: Arc<dyn KeyValueStore>,
}

impl LanguagePreference {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn saved(&self) -> Option<&'static str> {
        match self.storage.get(LANGUAGE_SLOT) {
            Ok(raw) => raw.as_deref().and_then(supported),
            Err(e) => {
                warn!("Could not read language preference: {e}");
                None
            }
        }
    }

    /// Stores the canonical code for `code` (unknown codes store the default) and returns it.
    pub fn change_language(&self, code: &str) -> Result<&'static str, StorageError> {
        let code = supported(code).unwrap_or(DEFAULT_LANGUAGE);
        self.storage.set(LANGUAGE_SLOT, code)?;
        debug!("Language preference set to {code}");
        Ok(code)
    }
}
