//! The editor page shell: toolbar, nav, section panels, template gallery and score ring.

use std::collections::BTreeMap;

use crate::i18n::{self, catalog::LANGUAGES};
use crate::models::{Document, TemplateId};
use crate::score::ScoreReport;
use crate::ui::{NavState, Section, UiState};

use super::forms::{education_editor, experience_editor, personal_form, skills_form};
use super::node::{el, Element, Node};
use super::templates;

const HEAD: &str = "<!DOCTYPE html>\n";
pub const BUSY_LABEL: &str = "Generating...";

/// Everything the page renderer reads.
pub struct PageModel<'a> {
    pub doc: &'a Document,
    pub values: &'a BTreeMap<String, String>,
    pub score: &'a ScoreReport,
    pub ui: &'a UiState,
    pub language: &'a str,
}

fn nav_label(section: Section) -> (&'static str, &'static str, &'static str) {
    match section {
        Section::Personal => ("nav.contact", "Contact Info", "user"),
        Section::Experience => ("nav.experience", "Experience", "briefcase"),
        Section::Education => ("nav.education", "Education", "graduation-cap"),
        Section::Skills => ("nav.skills", "Skills", "wrench"),
        Section::Templates => ("nav.templates", "Templates", "layout-template"),
    }
}

pub fn nav(state: &NavState) -> Node {
    el("nav")
        .class("sidebar flex flex-col gap-1")
        .children(Section::ALL.into_iter().map(|section| {
            let (key, fallback, icon) = nav_label(section);
            let active = state.open && state.active == Some(section);
            el("button")
                .attr("type", "button")
                .attr("id", format!("nav-{}", section.as_str()))
                .class(if active { "nav-item active" } else { "nav-item" })
                .attr("data-tab", section.as_str())
                .child(el("i").attr("data-lucide", icon).class("w-4 h-4"))
                .child(el("span").i18n(key, fallback))
                .into()
        }))
        .into()
}

pub fn toolbar(ui: &UiState, language: &str) -> Node {
    let export = if ui.busy {
        el("button")
            .attr("type", "button")
            .attr("id", "export-btn")
            .class("btn-primary opacity-75")
            .flag("disabled", true)
            .child(el("i").attr("data-lucide", "loader-2").class("w-4 h-4 animate-spin"))
            .child(el("span").text(BUSY_LABEL))
    } else {
        el("button")
            .attr("type", "button")
            .attr("id", "export-btn")
            .class("btn-primary")
            .child(el("i").attr("data-lucide", "download").class("w-4 h-4"))
            .child(el("span").i18n("action.download_pdf", "Download PDF"))
    };

    let language_select = el("select")
        .attr("id", "language-select")
        .class("rezi-input w-auto")
        .children(LANGUAGES.iter().map(|(code, _)| {
            el("option")
                .attr("value", *code)
                .flag("selected", *code == language)
                .text(code.to_uppercase())
                .into()
        }));

    el("header")
        .class("toolbar flex items-center justify-between gap-3 px-4 py-2 border-b border-gray-200")
        .child(el("div").class("font-bold text-lg").text("Resume Builder"))
        .child(
            el("div")
                .class("flex items-center gap-2")
                .child(language_select)
                .child(
                    el("button")
                        .attr("type", "button")
                        .attr("id", "save-btn")
                        .class("btn-secondary")
                        .child(el("span").i18n("action.save", "Save")),
                )
                .child(
                    el("button")
                        .attr("type", "button")
                        .attr("id", "load-btn")
                        .class("btn-secondary")
                        .child(el("span").i18n("action.load", "Load")),
                )
                .child(
                    el("button")
                        .attr("type", "button")
                        .attr("id", "share-btn")
                        .class("btn-secondary")
                        .flag("disabled", ui.busy)
                        .child(el("i").attr("data-lucide", "share-2").class("w-4 h-4"))
                        .child(el("span").text("Share")),
                )
                .child(export),
        )
        .into()
}

pub fn score_ring(score: &ScoreReport) -> Node {
    let ring = &score.ring;
    el("div")
        .attr("id", "score-badge")
        .class("relative w-10 h-10")
        .attr("title", format!("{} of {} signals", score.earned, score.possible))
        .child(
            el("svg")
                .attr("viewBox", "0 0 32 32")
                .class("w-10 h-10 -rotate-90")
                .child(
                    el("circle")
                        .attr("cx", "16")
                        .attr("cy", "16")
                        .attr("r", ring.radius.to_string())
                        .attr("fill", "none")
                        .attr("stroke-width", "3")
                        .class("text-gray-200")
                        .attr("stroke", "currentColor"),
                )
                .child(
                    el("circle")
                        .attr("id", "score-circle")
                        .attr("cx", "16")
                        .attr("cy", "16")
                        .attr("r", ring.radius.to_string())
                        .attr("fill", "none")
                        .attr("stroke-width", "3")
                        .attr("stroke", "currentColor")
                        .attr("class", score.band.css_class())
                        .attr(
                            "stroke-dasharray",
                            format!("{:.2} {:.2}", ring.circumference, ring.circumference),
                        )
                        .attr("stroke-dashoffset", format!("{:.2}", ring.dash_offset)),
                ),
        )
        .child(
            el("span")
                .attr("id", "score-text")
                .class("absolute inset-0 flex items-center justify-center text-xs font-bold")
                .text(score.score.to_string()),
        )
        .into()
}

pub fn template_gallery(selected: TemplateId) -> Node {
    el("div")
        .attr("id", "template-gallery")
        .class("grid grid-cols-2 gap-4")
        .children(TemplateId::ALL.into_iter().map(|t| {
            let is_selected = t == selected;
            el("button")
                .attr("type", "button")
                .attr("data-template-card", t.as_str())
                .class(if is_selected {
                    "template-card border-2 rounded-xl p-4 text-left border-blue-600 bg-blue-50/50"
                } else {
                    "template-card border-2 rounded-xl p-4 text-left border-gray-200"
                })
                .child(el("div").class("font-semibold capitalize").text(t.as_str()))
                .child(
                    el("span")
                        .class("selected-badge text-xs text-blue-600")
                        .flag("hidden", !is_selected)
                        .text("Selected"),
                )
                .into()
        }))
        .into()
}

fn section_panel(
    section: Section,
    nav: &NavState,
    heading: Option<(&'static str, &'static str, &'static str, &'static str)>,
    body: Vec<Node>,
) -> Node {
    let visible = nav.open && nav.active == Some(section);
    let mut panel = el("section")
        .attr("id", format!("section-{}", section.as_str()))
        .class("section-content space-y-4")
        .flag("hidden", !visible);
    if let Some((title_key, title, desc_key, desc)) = heading {
        panel = panel
            .child(el("h2").class("text-xl font-bold").i18n(title_key, title))
            .child(el("p").class("text-sm text-gray-500").i18n(desc_key, desc));
    }
    panel.children(body).into()
}

fn add_button(list: &'static str, key: &'static str, fallback: &str) -> Node {
    el("button")
        .attr("type", "button")
        .class("btn-dashed w-full")
        .attr("data-add", list)
        .child(el("i").attr("data-lucide", "plus").class("w-4 h-4"))
        .child(el("span").i18n(key, fallback))
        .into()
}

fn editor_panel(model: &PageModel<'_>) -> Element {
    let nav = &model.ui.nav;
    el("div")
        .class(if nav.open { "editor-panel open" } else { "editor-panel" })
        .child(section_panel(
            Section::Personal,
            nav,
            Some((
                "section.personal.title",
                "Personal Details",
                "section.personal.desc",
                "Your basic contact information.",
            )),
            vec![personal_form(model.doc, model.values)],
        ))
        .child(section_panel(
            Section::Experience,
            nav,
            Some((
                "section.experience.title",
                "Experience",
                "section.experience.desc",
                "Add your work history.",
            )),
            vec![
                experience_editor(model.doc),
                add_button("experience", "action.add_position", "Add Position"),
            ],
        ))
        .child(section_panel(
            Section::Education,
            nav,
            Some((
                "section.education.title",
                "Education",
                "section.education.desc",
                "Add your academic background.",
            )),
            vec![
                education_editor(model.doc),
                add_button("education", "action.add_education", "Add Education"),
            ],
        ))
        .child(section_panel(
            Section::Skills,
            nav,
            Some((
                "section.skills.title",
                "Skills",
                "section.skills.desc",
                "List your technical skills.",
            )),
            vec![skills_form(&model.doc.skills)],
        ))
        .child(section_panel(
            Section::Templates,
            nav,
            None,
            vec![template_gallery(model.doc.template)],
        ))
}

/// Body of the editor page, localised to `model.language`.
pub fn editor_body(model: &PageModel<'_>) -> Node {
    let mut body: Node = el("body")
        .class("bg-gray-50 text-gray-900")
        .child(toolbar(model.ui, model.language))
        .child(
            el("div")
                .class("flex h-[calc(100vh-56px)]")
                .child(nav(&model.ui.nav))
                .child(editor_panel(model))
                .child(
                    el("main")
                        .class("flex-1 overflow-auto p-8")
                        .child(
                            el("div")
                                .class("flex justify-end mb-4")
                                .child(score_ring(model.score)),
                        )
                        .child(
                            el("div")
                                .class("resume-paper bg-white shadow-lg p-8 mx-auto")
                                .child(templates::render(model.doc)),
                        ),
                ),
        )
        .child(el("script").attr("src", "/assets/editor.js"))
        .into();
    i18n::localize(&mut body, model.language);
    body
}

/// Full HTML document for the editor.
pub fn editor_page(model: &PageModel<'_>) -> String {
    let head: Node = el("head")
        .child(el("meta").attr("charset", "utf-8"))
        .child(
            el("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(el("title").text("Resume Builder"))
        .child(el("script").attr("src", "https://cdn.tailwindcss.com"))
        .child(el("script").attr("src", "https://unpkg.com/lucide@latest"))
        .into();
    let html: Node = el("html")
        .attr("lang", model.language.to_string())
        .child(head)
        .child(editor_body(model))
        .into();
    format!("{HEAD}{}", html.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{compute_score, ScoreBoost};

    fn page(doc: &Document, ui: &UiState, language: &str) -> String {
        let score = compute_score(doc, &ScoreBoost::default());
        let values = BTreeMap::new();
        editor_page(&PageModel {
            doc,
            values: &values,
            score: &score,
            ui,
            language,
        })
    }

    #[test]
    fn test_toolbar_busy_state() {
        let mut ui = UiState::new(true);
        let idle = toolbar(&ui, "en").render();
        assert!(idle.contains("Download PDF"));
        assert!(!idle.contains("disabled"));

        ui.busy = true;
        let busy = toolbar(&ui, "en").render();
        assert!(busy.contains(BUSY_LABEL));
        assert!(busy.contains("id=\"export-btn\" class=\"btn-primary opacity-75\" disabled"));
        assert!(busy.contains("id=\"share-btn\" class=\"btn-secondary\" disabled"));
    }

    #[test]
    fn test_busy_label_survives_localisation() {
        let mut ui = UiState::new(true);
        ui.busy = true;
        let html = page(&Document::sample(), &ui, "de");
        assert!(html.contains(BUSY_LABEL));
        assert!(!html.contains("PDF herunterladen"));
    }

    #[test]
    fn test_page_is_localised() {
        let ui = UiState::new(true);
        let html = page(&Document::sample(), &ui, "tr");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"tr\">"));
        assert!(html.contains(">Kaydet<"));
        assert!(html.contains(">Pozisyon Ekle<"));
        assert!(html.contains("<option value=\"tr\" selected>TR</option>"));
    }

    #[test]
    fn test_only_active_section_visible() {
        let ui = UiState::new(true);
        let html = page(&Document::sample(), &ui, "en");
        assert!(html.contains("id=\"section-personal\" class=\"section-content space-y-4\">"));
        assert!(html.contains("id=\"section-skills\" class=\"section-content space-y-4\" hidden>"));
        assert!(html.contains("id=\"nav-personal\" class=\"nav-item active\""));
    }

    #[test]
    fn test_gallery_marks_selected() {
        let html = template_gallery(TemplateId::Creative).render();
        assert_eq!(html.matches("border-blue-600").count(), 1);
        assert!(html.contains("data-template-card=\"creative\" class=\"template-card border-2 rounded-xl p-4 text-left border-blue-600"));
        assert_eq!(html.matches(" hidden>Selected").count(), 3);
    }

    #[test]
    fn test_score_ring_geometry() {
        let report = compute_score(&Document::sample(), &ScoreBoost::default());
        let html = score_ring(&report).render();
        assert!(html.contains(">90</span>"));
        assert!(html.contains("text-green-500"));
        assert!(html.contains("stroke-dasharray=\"87.96 87.96\""));
    }

    #[test]
    fn test_score_ring_circles_are_closed_siblings() {
        let report = compute_score(&Document::sample(), &ScoreBoost::default());
        let html = score_ring(&report).render();
        assert_eq!(html.matches("<circle ").count(), 2);
        assert_eq!(html.matches("</circle>").count(), 2);
        let track_end = html.find("</circle>").unwrap();
        let arc_start = html.find("<circle id=\"score-circle\"").unwrap();
        assert!(track_end < arc_start, "arc must not nest inside the track: {html}");
    }
}
