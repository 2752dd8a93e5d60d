//! Canned description bullets for experience entries. No generation happens here: the
//! role label is only interpolated into the first line.

use crate::models::ExperienceEntry;
use crate::store::{DocumentStore, PersistOutcome};

use super::lists::{self, ListError};

const FALLBACK_ROLE: &str = "General";

pub fn suggestions_for(role: &str) -> Vec<String> {
    let role = match role.trim() {
        "" => FALLBACK_ROLE,
        r => r,
    };
    vec![
        format!("• Led the development of key features for {role}, improving user engagement by 20%."),
        "• Collaborated with cross-functional teams to design and implement scalable solutions."
            .to_string(),
        "• Optimized legacy codebases, reducing technical debt and improving performance by 30%."
            .to_string(),
        "• Mentored junior team members and established best practices for code quality."
            .to_string(),
        "• Conducted data analysis to identify trends and drive decision-making processes."
            .to_string(),
    ]
}

/// Appends `line`, inserting a newline unless the text is empty or already ends in one.
pub fn append_line(existing: &str, line: &str) -> String {
    let separator = if !existing.is_empty() && !existing.ends_with('\n') {
        "\n"
    } else {
        ""
    };
    format!("{existing}{separator}{line}")
}

pub fn apply_suggestion(
    store: &mut DocumentStore,
    index: usize,
    line: &str,
) -> Result<PersistOutcome, ListError> {
    let current = store
        .get_state()
        .experience
        .get(index)
        .map(|e| e.description.clone())
        .ok_or(ListError::NoEntryAt {
            section: "experience",
            index,
        })?;
    lists::update::<ExperienceEntry>(store, index, "description", append_line(&current, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_role_is_interpolated() {
        let s = suggestions_for("Data Engineer");
        assert_eq!(s.len(), 5);
        assert!(s[0].contains("for Data Engineer,"));
    }

    #[test]
    fn test_empty_role_uses_fallback() {
        assert!(suggestions_for("  ")[0].contains("for General,"));
    }

    #[test]
    fn test_append_line_separator_rules() {
        assert_eq!(append_line("", "b"), "b");
        assert_eq!(append_line("a", "b"), "a\nb");
        assert_eq!(append_line("a\n", "b"), "a\nb");
    }

    #[test]
    fn test_apply_suggestion_appends_to_description() {
        let mut store = DocumentStore::load(Arc::new(MemoryStorage::new()));
        let before = store.get_state().experience[0].description.clone();
        apply_suggestion(&mut store, 0, "• Shipped it").unwrap();
        assert_eq!(
            store.get_state().experience[0].description,
            format!("{before}\n• Shipped it")
        );
    }

    #[test]
    fn test_apply_suggestion_bad_index() {
        let mut store = DocumentStore::load(Arc::new(MemoryStorage::new()));
        assert!(apply_suggestion(&mut store, 3, "x").is_err());
    }
}
