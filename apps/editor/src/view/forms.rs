//! Editor-side fragments: personal form, skills form and the list editor blocks.
//!
//! Inputs carry `data-*` hooks that the page script turns into API calls:
//! `data-model` for binder paths, `data-list`/`data-index`/`data-field` for entry edits,
//! `data-remove`/`data-id` for removal.

use std::collections::BTreeMap;

use crate::editor::lists::ListEntry;
use crate::editor::suggestions::suggestions_for;
use crate::models::{split_skills, Document, EducationEntry, ExperienceEntry};

use super::node::{el, Element, Node};

/// Display metadata for one editable entry field.
struct FieldSpec {
    name: &'static str,
    i18n: &'static str,
    label: &'static str,
    placeholder: &'static str,
}

const EXPERIENCE_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "company", i18n: "label.company", label: "Company", placeholder: "Company Name" },
    FieldSpec { name: "role", i18n: "label.role", label: "Role", placeholder: "Role / Job Title" },
    FieldSpec { name: "location", i18n: "label.location", label: "Location", placeholder: "City, Country" },
    FieldSpec { name: "startDate", i18n: "label.start_date", label: "Start Date", placeholder: "YYYY-MM" },
    FieldSpec { name: "endDate", i18n: "label.end_date", label: "End Date", placeholder: "Present" },
];

const EDUCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "school", i18n: "label.school", label: "School", placeholder: "University Name" },
    FieldSpec { name: "degree", i18n: "label.degree", label: "Degree", placeholder: "Bachelor's in CS" },
    FieldSpec { name: "location", i18n: "label.location", label: "Location", placeholder: "City, Country" },
    FieldSpec { name: "startDate", i18n: "label.start_date", label: "Start Date", placeholder: "YYYY" },
    FieldSpec { name: "endDate", i18n: "label.end_date", label: "End Date", placeholder: "YYYY" },
];

/// (binder path, i18n key, default label, input type)
const PERSONAL_INPUTS: &[(&str, &str, &str, &str)] = &[
    ("personal.fullName", "label.fullname", "Full Name", "text"),
    ("personal.headline", "label.headline", "Headline", "text"),
    ("personal.email", "label.email", "Email", "email"),
    ("personal.phone", "label.phone", "Phone", "tel"),
    ("personal.location", "label.location", "Location", "text"),
    ("personal.linkedin", "label.linkedin", "LinkedIn", "text"),
    ("personal.website", "label.website", "Website", "text"),
    ("resumeTitle", "label.resume_title", "Resume Title", "text"),
];

fn label(key: &'static str, fallback: &str) -> Element {
    el("label").class("rezi-label").i18n(key, fallback)
}

fn entry_input<E: ListEntry>(entry: &E, index: usize, spec: &FieldSpec) -> Node {
    el("div")
        .child(label(spec.i18n, spec.label))
        .child(
            el("input")
                .attr("type", "text")
                .class("rezi-input")
                .attr("value", entry.field(spec.name).unwrap_or(""))
                .attr("placeholder", spec.placeholder)
                .attr("data-list", E::SECTION)
                .attr("data-index", index.to_string())
                .attr("data-field", spec.name),
        )
        .into()
}

fn remove_button<E: ListEntry>(entry: &E) -> Element {
    el("button")
        .attr("type", "button")
        .class("absolute top-4 right-4 text-gray-400 hover:text-red-500 transition-colors p-1")
        .attr("title", "Remove")
        .attr("data-remove", E::SECTION)
        .attr("data-id", entry.id().to_string())
        .child(el("i").attr("data-lucide", "trash-2").class("w-4 h-4"))
}

fn entry_card<E: ListEntry>(entry: &E, index: usize, fields: &[FieldSpec]) -> Element {
    let (head, dates): (Vec<&FieldSpec>, Vec<&FieldSpec>) =
        fields.iter().partition(|f| !f.name.ends_with("Date"));
    el("div")
        .class("section-card relative group")
        .attr("data-entry-id", entry.id().to_string())
        .child(remove_button(entry))
        .child(
            el("div")
                .class("grid grid-cols-1 gap-4")
                .children(head.into_iter().map(|f| entry_input(entry, index, f)))
                .child(
                    el("div")
                        .class("grid grid-cols-2 gap-4")
                        .children(dates.into_iter().map(|f| entry_input(entry, index, f))),
                ),
        )
}

fn experience_block(entry: &ExperienceEntry, index: usize) -> Node {
    let description = el("div")
        .child(
            el("div")
                .class("flex justify-between items-center mb-1")
                .child(
                    el("label")
                        .class("rezi-label mb-0")
                        .i18n("label.description", "Description"),
                )
                .child(
                    el("button")
                        .attr("type", "button")
                        .class("text-xs flex items-center gap-1 text-purple-600 font-bold hover:bg-purple-50 px-2 py-1 rounded transition-colors border border-purple-200")
                        .attr("data-suggest", index.to_string())
                        .child(el("i").attr("data-lucide", "sparkles").class("w-3 h-3"))
                        .text(" Suggest"),
                ),
        )
        .child(
            el("div")
                .attr("id", format!("suggestions-{index}"))
                .class("hidden mb-3 bg-purple-50 border border-purple-100 rounded-lg p-3"),
        )
        .child(
            el("textarea")
                .attr("id", format!("exp-desc-{index}"))
                .class("rezi-input h-32 resize-none leading-relaxed")
                .attr("placeholder", "Did X to achieve Y...")
                .attr("data-list", ExperienceEntry::SECTION)
                .attr("data-index", index.to_string())
                .attr("data-field", "description")
                .text(&entry.description),
        );

    let mut card = entry_card(entry, index, EXPERIENCE_FIELDS);
    if let Some(Node::Element(grid)) = card.children.last_mut() {
        grid.children.push(description.into());
    }
    card.into()
}

/// Editable blocks for every experience entry.
pub fn experience_editor(doc: &Document) -> Node {
    el("div")
        .attr("id", "experience-list")
        .class("space-y-4")
        .children(
            doc.experience
                .iter()
                .enumerate()
                .map(|(i, e)| experience_block(e, i)),
        )
        .into()
}

/// Editable blocks for every education entry.
pub fn education_editor(doc: &Document) -> Node {
    el("div")
        .attr("id", "education-list")
        .class("space-y-4")
        .children(
            doc.education
                .iter()
                .enumerate()
                .map(|(i, e)| entry_card::<EducationEntry>(e, i, EDUCATION_FIELDS).into()),
        )
        .into()
}

/// Canned description lines for the entry at `index`, each one a button that appends it.
pub fn suggestion_list(index: usize, role: &str) -> Node {
    el("div")
        .attr("id", format!("suggestions-{index}"))
        .class("mb-3 bg-purple-50 border border-purple-100 rounded-lg p-3")
        .child(
            el("p")
                .class("text-[10px] font-bold text-purple-700 mb-2 uppercase tracking-wider")
                .i18n("label.suggestions", "Suggestions"),
        )
        .child(
            el("div").class("space-y-2").children(suggestions_for(role).into_iter().map(|line| {
                el("button")
                    .attr("type", "button")
                    .class("text-xs text-left w-full p-2 bg-white border border-purple-100 rounded hover:border-purple-300 text-gray-700 flex items-start gap-2")
                    .attr("data-apply-suggestion", index.to_string())
                    .attr("data-line", line.clone())
                    .child(el("i").attr("data-lucide", "plus").class("w-3 h-3 text-purple-400 mt-0.5"))
                    .child(el("span").text(line))
                    .into()
            })),
        )
        .into()
}

fn photo_block(doc: &Document) -> Node {
    let photo = doc.personal.photo.as_deref().filter(|p| !p.is_empty());
    let preview = match photo {
        Some(src) => el("div")
            .attr("id", "photo-preview")
            .class("w-24 h-24 rounded-xl overflow-hidden")
            .child(el("img").attr("src", src).attr("alt", "").class("w-full h-full object-cover")),
        None => el("div")
            .attr("id", "photo-preview")
            .class("w-24 h-24 rounded-xl overflow-hidden border-dashed border-2 flex items-center justify-center")
            .child(el("i").attr("data-lucide", "camera").class("w-8 h-8")),
    };
    el("div")
        .class("flex items-center gap-4 mb-6")
        .child(preview)
        .child(
            el("div")
                .class("space-y-2")
                .child(
                    el("input")
                        .attr("type", "file")
                        .attr("id", "photo-upload")
                        .attr("accept", "image/*"),
                )
                .child(
                    el("button")
                        .attr("type", "button")
                        .attr("id", "remove-photo-btn")
                        .class("text-xs text-red-500")
                        .flag("hidden", photo.is_none())
                        .text("Remove photo"),
                ),
        )
        .into()
}

/// Personal details form; input values come from the binder snapshot.
pub fn personal_form(doc: &Document, values: &BTreeMap<String, String>) -> Node {
    el("div")
        .attr("id", "personal-form")
        .child(photo_block(doc))
        .child(
            el("div").class("grid grid-cols-1 gap-4").children(PERSONAL_INPUTS.iter().map(
                |(path, key, fallback, kind)| {
                    el("div")
                        .child(label(*key, fallback))
                        .child(
                            el("input")
                                .attr("type", *kind)
                                .class("rezi-input")
                                .attr("data-model", *path)
                                .attr("value", values.get(*path).cloned().unwrap_or_default()),
                        )
                        .into()
                },
            )),
        )
        .into()
}

const QUICK_SKILLS: &[&str] = &["TypeScript", "Python", "SQL", "Docker", "AWS", "Leadership"];

pub fn skills_form(skills: &str) -> Node {
    let current = split_skills(skills);
    el("div")
        .attr("id", "skills-form")
        .child(label("label.skills_list", "Skills (Comma Separated)"))
        .child(
            el("textarea")
                .class("rezi-input h-32")
                .attr("data-model", "skills")
                .text(skills),
        )
        .child(
            el("div")
                .class("flex flex-wrap gap-2 mt-3")
                .children(QUICK_SKILLS.iter().filter(|s| !current.contains(*s)).map(|s| {
                    el("button")
                        .attr("type", "button")
                        .class("text-xs border border-gray-200 rounded-full px-3 py-1 hover:border-blue-400")
                        .attr("data-add-skill", *s)
                        .text(format!("+ {s}"))
                        .into()
                })),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(html: &str, needle: &str) -> usize {
        html.matches(needle).count()
    }

    #[test]
    fn test_one_block_per_entry_with_index_and_id() {
        let mut doc = Document::sample();
        doc.experience.push(ExperienceEntry::placeholder(77));
        let html = experience_editor(&doc).render();
        assert_eq!(count(&html, "class=\"section-card"), 2);
        assert!(html.contains("data-remove=\"experience\" data-id=\"77\""));
        assert!(html.contains("data-index=\"1\" data-field=\"company\""));
        assert!(html.contains("value=\"New Company\""));
    }

    #[test]
    fn test_every_entry_field_is_editable() {
        let doc = Document::sample();
        let html = experience_editor(&doc).render();
        for f in ExperienceEntry::FIELDS {
            assert!(
                html.contains(&format!("data-field=\"{f}\"")),
                "no input for experience field {f}"
            );
        }
        let html = education_editor(&doc).render();
        for f in EducationEntry::FIELDS {
            assert!(
                html.contains(&format!("data-field=\"{f}\"")),
                "no input for education field {f}"
            );
        }
    }

    #[test]
    fn test_entry_values_cannot_break_markup() {
        let mut doc = Document::sample();
        doc.education[0].school = "\"><img src=x onerror=alert(1)>".to_string();
        let html = education_editor(&doc).render();
        assert!(!html.contains("<img"));
        assert!(html.contains("value=\"&quot;&gt;&lt;img"));
    }

    #[test]
    fn test_empty_collection_renders_empty_list() {
        let mut doc = Document::sample();
        doc.education.clear();
        assert_eq!(
            education_editor(&doc).render(),
            "<div id=\"education-list\" class=\"space-y-4\"></div>"
        );
    }

    #[test]
    fn test_suggestion_list_carries_lines() {
        let html = suggestion_list(2, "Analyst").render();
        assert_eq!(count(&html, "data-apply-suggestion=\"2\""), 5);
        assert!(html.contains("for Analyst,"));
        assert!(html.contains("data-i18n=\"label.suggestions\""));
    }

    #[test]
    fn test_personal_form_uses_binder_values() {
        let doc = Document::sample();
        let mut values = BTreeMap::new();
        values.insert("personal.email".to_string(), "bound@example.com".to_string());
        let html = personal_form(&doc, &values).render();
        assert!(html.contains("data-model=\"personal.email\" value=\"bound@example.com\""));
        assert!(html.contains("id=\"remove-photo-btn\" class=\"text-xs text-red-500\" hidden"));
    }

    #[test]
    fn test_skills_form_hides_present_quick_skills() {
        let html = skills_form("Python, Go").render();
        assert!(!html.contains("data-add-skill=\"Python\""));
        assert!(html.contains("data-add-skill=\"SQL\""));
        assert!(html.contains(">Python, Go</textarea>"));
    }
}
