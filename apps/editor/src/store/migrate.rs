//! Versioned load path for the persisted document.
//!
//! Persisted JSON is upgraded one schema step at a time, then every missing key is
//! backfilled from the sample document (top level, then `personal` field by field)
//! before decoding. Anything unreadable yields the sample document.

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::Document;

pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";
pub const CURRENT_SCHEMA_VERSION: u64 = 1;

type Migration = fn(&mut Map<String, Value>);

/// `MIGRATIONS[n]` upgrades a version-`n` object to version `n + 1`.
const MIGRATIONS: &[Migration] = &[migrate_v0_to_v1];

/// v0 is the unversioned legacy shape: `template` could be any value and there was no
/// `resumeTitle`.
fn migrate_v0_to_v1(obj: &mut Map<String, Value>) {
    if !matches!(obj.get("template"), Some(Value::String(_))) {
        obj.remove("template");
    }
    if !matches!(obj.get("resumeTitle"), Some(Value::String(_))) {
        obj.remove("resumeTitle");
    }
}

/// Serializes a document with the current schema version stamped in.
pub fn encode(doc: &Document) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(doc)?;
    if let Value::Object(obj) = &mut value {
        obj.insert(SCHEMA_VERSION_KEY.to_string(), Value::from(CURRENT_SCHEMA_VERSION));
    }
    serde_json::to_string(&value)
}

/// Decodes persisted JSON, upgrading and backfilling it. An empty slot yields the sample
/// document; unreadable content is an error for the caller to discard.
pub fn load(raw: Option<&str>) -> Result<Document, serde_json::Error> {
    match raw {
        Some(raw) => decode(raw),
        None => {
            debug!("No persisted document, starting from sample");
            Ok(Document::sample())
        }
    }
}

fn decode(raw: &str) -> Result<Document, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(mut obj) = value else {
        return Err(serde::de::Error::custom("persisted document is not an object"));
    };

    let mut version = obj
        .remove(SCHEMA_VERSION_KEY)
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    while let Some(step) = MIGRATIONS.get(version as usize) {
        step(&mut obj);
        version += 1;
    }

    backfill(&mut obj)?;
    serde_json::from_value(Value::Object(obj))
}

/// Fills every missing top-level key and every missing `personal` key from the sample.
fn backfill(obj: &mut Map<String, Value>) -> Result<(), serde_json::Error> {
    let Value::Object(defaults) = serde_json::to_value(Document::sample())? else {
        return Ok(());
    };

    for (key, default) in defaults {
        match obj.get_mut(&key) {
            None | Some(Value::Null) => {
                obj.insert(key, default);
            }
            Some(Value::Object(saved)) if key == "personal" => {
                if let Value::Object(default_fields) = default {
                    for (field, value) in default_fields {
                        saved.entry(field).or_insert(value);
                    }
                }
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_slot_yields_sample() {
        assert_eq!(load(None).unwrap(), Document::sample());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(load(Some("{not json")).is_err());
        assert!(load(Some("[1,2,3]")).is_err());
        assert!(load(Some("{\"experience\": \"oops\"}")).is_err());
    }

    #[test]
    fn test_legacy_document_gains_new_personal_fields() {
        // Saved before linkedin/website existed
        let legacy = json!({
            "personal": { "fullName": "Ada", "email": "ada@example.com" },
            "experience": [],
            "education": [],
            "skills": "Rust",
            "template": "creative"
        });
        let doc = load(Some(&legacy.to_string())).unwrap();
        assert_eq!(doc.personal.full_name, "Ada");
        assert_eq!(doc.personal.email, "ada@example.com");
        assert_eq!(doc.personal.linkedin, Document::sample().personal.linkedin);
        assert_eq!(doc.personal.website, Document::sample().personal.website);
        assert!(doc.experience.is_empty());
        assert_eq!(doc.template, crate::models::TemplateId::Creative);
        assert_eq!(doc.resume_title, "");
    }

    #[test]
    fn test_missing_top_level_keys_are_backfilled() {
        let doc = load(Some("{\"skills\": \"Go\"}")).unwrap();
        assert_eq!(doc.skills, "Go");
        assert_eq!(doc.experience, Document::sample().experience);
        assert_eq!(doc.personal, Document::sample().personal);
    }

    #[test]
    fn test_legacy_non_string_template_resets() {
        let doc = load(Some("{\"template\": 7}")).unwrap();
        assert_eq!(doc.template, crate::models::TemplateId::Modern);
    }

    #[test]
    fn test_roundtrip_preserves_document() {
        let mut doc = Document::sample();
        doc.personal.photo = Some("data:image/jpeg;base64,AAAA".to_string());
        doc.skills = "A, B".to_string();
        doc.resume_title = "Platform CV".to_string();
        let encoded = encode(&doc).unwrap();
        assert!(encoded.contains("\"schemaVersion\":1"));
        assert_eq!(load(Some(&encoded)).unwrap(), doc);
    }

    #[test]
    fn test_entry_missing_fields_decode_empty() {
        let doc = load(Some("{\"education\": [{\"id\": 9, \"school\": \"MIT\"}]}")).unwrap();
        assert_eq!(doc.education.len(), 1);
        assert_eq!(doc.education[0].id, 9);
        assert_eq!(doc.education[0].degree, "");
    }
}
