//! Résumé preview variants.
//!
//! All four lay out the same sections. Empty optional values drop their element instead
//! of leaving a blank one behind, and empty collections render as empty sections.

use crate::models::{Document, EducationEntry, ExperienceEntry, PersonalInfo, TemplateId};

use super::node::{el, Element, Node};

pub const PREVIEW_ROOT_ID: &str = "resume-preview-content";

/// Renders the variant selected by `doc.template`.
pub fn render(doc: &Document) -> Node {
    let body = match doc.template {
        TemplateId::Modern => modern(doc),
        TemplateId::Executive => executive(doc),
        TemplateId::Creative => creative(doc),
        TemplateId::Minimalist => minimalist(doc),
    };
    el("div")
        .attr("id", PREVIEW_ROOT_ID)
        .attr("data-template", doc.template.as_str())
        .children(body)
        .into()
}

pub fn render_html(doc: &Document) -> String {
    render(doc).render()
}

/// `https://` plus the value with any leading scheme removed.
pub fn link_href(value: &str) -> String {
    format!("https://{}", strip_scheme(value))
}

fn strip_scheme(value: &str) -> &str {
    value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .unwrap_or(value)
}

/// Joins the non-empty dates; `None` when both are empty.
fn date_range(start: &str, end: &str, sep: &str) -> Option<String> {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, true) => Some(start.to_string()),
        (true, false) => Some(end.to_string()),
        (false, false) => Some(format!("{start}{sep}{end}")),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn text_el(tag: &'static str, class: &'static str, value: &str) -> Option<Node> {
    non_empty(value).map(|v| el(tag).class(class).text(v).into())
}

fn photo(personal: &PersonalInfo, class: &'static str) -> Option<Node> {
    personal
        .photo
        .as_deref()
        .and_then(non_empty)
        .map(|src| el("img").attr("src", src).attr("alt", "").class(class).into())
}

fn icon(name: &'static str, class: &'static str) -> Node {
    el("i").attr("data-lucide", name).class(class).into()
}

fn link(value: &str, class: &'static str) -> Option<Node> {
    non_empty(value).map(|v| {
        el("a")
            .attr("href", link_href(v))
            .attr("target", "_blank")
            .attr("rel", "noopener")
            .class(class)
            .text(v)
            .into()
    })
}

fn chips(doc: &Document, class: &'static str) -> Element {
    el("div")
        .class("flex flex-wrap gap-2")
        .children(doc.skill_list().into_iter().map(|s| el("span").class(class).text(s).into()))
}

// modern

fn modern(doc: &Document) -> Vec<Node> {
    let p = &doc.personal;

    let contact_row = |value: Option<Node>, icon_name: &'static str| -> Option<Node> {
        value.map(|v| {
            el("div")
                .class("flex items-center justify-end gap-2")
                .child(v)
                .child(icon(icon_name, "w-3 h-3"))
                .into()
        })
    };

    let header = el("div")
        .class("flex justify-between items-start mb-8 pb-6 border-b border-gray-200 gap-6")
        .child(
            el("div")
                .class("flex items-center gap-6 flex-1")
                .maybe(photo(
                    p,
                    "w-32 h-32 rounded-2xl object-cover shadow-sm border border-gray-100",
                ))
                .child(
                    el("div")
                        .child(
                            el("h1")
                                .class("text-5xl font-bold mb-2 text-gray-900 tracking-tight")
                                .attr("style", "font-family: 'Outfit', sans-serif;")
                                .text(&p.full_name),
                        )
                        .maybe(text_el(
                            "p",
                            "text-xl text-primary font-medium tracking-wide text-indigo-600",
                            &p.headline,
                        )),
                ),
        )
        .child(
            el("div")
                .class("text-right text-sm text-gray-500 space-y-1")
                .maybe(contact_row(text_el("span", "contact-email", &p.email), "mail"))
                .maybe(contact_row(text_el("span", "contact-phone", &p.phone), "phone"))
                .maybe(contact_row(
                    text_el("span", "contact-location", &p.location),
                    "map-pin",
                ))
                .maybe(contact_row(
                    link(&p.linkedin, "hover:underline text-blue-600"),
                    "linkedin",
                ))
                .maybe(contact_row(
                    link(&p.website, "hover:underline text-blue-600"),
                    "globe",
                )),
        );

    let heading = |icon_name: &'static str, label: &str| -> Node {
        el("h3")
            .class("font-bold mb-4 uppercase text-sm tracking-wider text-gray-400 flex items-center gap-2")
            .child(icon(icon_name, "w-4 h-4"))
            .text(format!(" {label}"))
            .into()
    };

    let experience = el("div")
        .class("resume-experience")
        .child(heading("briefcase", "Experience"))
        .children(doc.experience.iter().map(modern_experience));

    let education = el("div")
        .class("mb-8 resume-education")
        .child(heading("graduation-cap", "Education"))
        .children(doc.education.iter().map(|e| {
            el("div")
                .class("mb-4")
                .maybe(text_el("div", "font-bold text-gray-800", &e.school))
                .maybe(
                    date_range(&e.start_date, &e.end_date, " - ")
                        .map(|d| el("div").class("text-sm text-gray-500 mb-1").text(d).into()),
                )
                .maybe(text_el("div", "text-sm font-medium text-indigo-600", &e.degree))
                .into()
        }));

    let skills = el("div").class("resume-skills").child(heading("wrench", "Skills")).child(
        chips(
            doc,
            "skill-chip text-xs bg-indigo-50 text-indigo-700 px-2 py-1 rounded font-medium border border-indigo-100",
        ),
    );

    vec![
        header.into(),
        el("div")
            .class("grid grid-cols-[2fr_1fr] gap-8")
            .child(experience)
            .child(el("div").child(education).child(skills))
            .into(),
    ]
}

fn modern_experience(e: &ExperienceEntry) -> Node {
    el("div")
        .class("mb-6 group")
        .child(
            el("div")
                .class("flex justify-between items-baseline mb-1")
                .maybe(text_el("span", "text-lg font-bold text-gray-800", &e.company))
                .maybe(date_range(&e.start_date, &e.end_date, " - ").map(|d| {
                    el("span")
                        .class("text-xs font-semibold bg-gray-100 px-2 py-1 rounded text-gray-600")
                        .text(d)
                        .into()
                })),
        )
        .maybe(text_el("div", "text-indigo-600 font-medium text-sm mb-2", &e.role))
        .maybe(text_el(
            "div",
            "text-sm text-gray-600 leading-relaxed whitespace-pre-line",
            &e.description,
        ))
        .into()
}

// executive

const EXECUTIVE_HEADING: &str =
    "font-bold font-serif text-lg bg-gray-100 p-1 mb-3 text-gray-800 border-l-4 border-gray-800 pl-2";

fn executive_section(title: &str, class: &'static str) -> Element {
    el("div")
        .class(class)
        .child(el("h3").class(EXECUTIVE_HEADING).text(title))
}

fn executive(doc: &Document) -> Vec<Node> {
    let p = &doc.personal;

    let header = el("div")
        .class("text-center border-b-2 border-gray-800 pb-4 mb-6 relative")
        .maybe(photo(
            p,
            "w-32 h-32 rounded-full object-cover mx-auto mb-4 border-4 border-gray-200",
        ))
        .child(
            el("h1")
                .class("text-4xl font-serif font-bold text-gray-900 mb-2 uppercase tracking-widest")
                .text(&p.full_name),
        )
        .child(
            el("div")
                .class("text-sm text-gray-600 flex flex-wrap justify-center gap-4")
                .maybe(text_el("span", "contact-email", &p.email))
                .maybe(text_el("span", "contact-phone", &p.phone))
                .maybe(text_el("span", "contact-location", &p.location)),
        )
        .child(
            el("div")
                .class("text-sm text-gray-600 flex flex-wrap justify-center gap-4 mt-1")
                .maybe(link(&p.linkedin, "hover:underline text-gray-800"))
                .maybe(link(&p.website, "hover:underline text-gray-800")),
        );

    let summary = executive_section("SUMMARY", "mb-6 resume-summary").maybe(text_el(
        "p",
        "text-gray-700 leading-relaxed font-serif",
        &p.headline,
    ));

    let experience = executive_section("EXPERIENCE", "mb-6 resume-experience").children(
        doc.experience.iter().map(|e| {
            el("div")
                .class("mb-5 last:mb-0")
                .child(
                    el("div")
                        .class("flex justify-between items-baseline mb-1")
                        .maybe(text_el("span", "font-bold text-gray-900 text-lg font-serif", &e.company))
                        .maybe(date_range(&e.start_date, &e.end_date, " - ").map(|d| {
                            el("span")
                                .class("text-sm font-medium text-gray-600 font-serif")
                                .text(d)
                                .into()
                        })),
                )
                .maybe(text_el("div", "text-gray-800 font-semibold italic mb-1 font-serif", &e.role))
                .maybe(text_el(
                    "div",
                    "text-sm text-gray-700 whitespace-pre-line leading-relaxed pl-1 font-serif",
                    &e.description,
                ))
                .into()
        }),
    );

    let education = executive_section("EDUCATION", "mb-6 resume-education").children(
        doc.education.iter().map(|e| {
            el("div")
                .class("mb-3 last:mb-0")
                .child(
                    el("div")
                        .class("flex justify-between items-baseline")
                        .maybe(text_el("span", "font-bold text-gray-900 font-serif", &e.school))
                        .maybe(date_range(&e.start_date, &e.end_date, " - ").map(|d| {
                            el("span").class("text-sm text-gray-600 font-serif").text(d).into()
                        })),
                )
                .maybe(text_el("div", "italic text-gray-700 font-serif", &e.degree))
                .into()
        }),
    );

    let skills = executive_section("SKILLS", "resume-skills").child(
        el("div")
            .class("text-gray-700 leading-relaxed font-serif")
            .text(doc.skill_list().join(", ")),
    );

    vec![
        header.into(),
        summary.into(),
        experience.into(),
        education.into(),
        skills.into(),
    ]
}

// creative

fn creative(doc: &Document) -> Vec<Node> {
    let p = &doc.personal;

    let banner = el("div")
        .class("bg-indigo-600 text-white p-8 mb-8 -mx-8 -mt-8 flex items-center justify-between")
        .child(
            el("div")
                .child(
                    el("h1")
                        .class("text-5xl font-black mb-2 tracking-tight")
                        .text(&p.full_name),
                )
                .maybe(text_el(
                    "p",
                    "text-xl font-medium text-indigo-200 tracking-wide uppercase",
                    &p.headline,
                )),
        )
        .maybe(photo(
            p,
            "w-32 h-32 rounded-full border-4 border-white/30 object-cover shadow-lg",
        ));

    let contact_row = |icon_name: &'static str, value: Option<Node>| -> Option<Node> {
        value.map(|v| {
            el("div")
                .class("flex items-center gap-3")
                .child(
                    el("div")
                        .class("w-8 h-8 rounded-full bg-indigo-50 flex items-center justify-center text-indigo-600 shrink-0")
                        .child(icon(icon_name, "w-4 h-4")),
                )
                .child(v)
                .into()
        })
    };

    let side_heading = |title: &str| -> Node {
        el("h4")
            .class("font-bold text-indigo-600 uppercase tracking-widest text-xs mb-4")
            .text(title)
            .into()
    };

    let contact = el("div").child(side_heading("Contact")).child(
        el("div")
            .class("space-y-3 text-sm text-gray-600")
            .maybe(contact_row("mail", text_el("span", "break-all", &p.email)))
            .maybe(contact_row("phone", text_el("span", "contact-phone", &p.phone)))
            .maybe(contact_row(
                "map-pin",
                text_el("span", "contact-location", &p.location),
            ))
            .maybe(contact_row(
                "linkedin",
                link(&p.linkedin, "hover:text-indigo-600 truncate"),
            ))
            .maybe(contact_row(
                "globe",
                link(&p.website, "hover:text-indigo-600 truncate"),
            )),
    );

    let skills = el("div")
        .class("resume-skills")
        .child(side_heading("Skills"))
        .child(chips(
            doc,
            "skill-chip text-xs bg-gray-900 text-white px-3 py-1.5 rounded-full font-bold",
        ));

    let education = el("div")
        .class("resume-education")
        .child(side_heading("Education"))
        .children(doc.education.iter().map(creative_education));

    let experience = el("div")
        .class("resume-experience")
        .child(
            el("h4")
                .class("font-black text-2xl text-gray-900 mb-6 flex items-center gap-3")
                .child(el("span").class("w-2 h-8 bg-indigo-600 rounded-full"))
                .text("Experience"),
        )
        .children(doc.experience.iter().map(creative_experience));

    vec![
        banner.into(),
        el("div")
            .class("grid grid-cols-12 gap-8")
            .child(
                el("div")
                    .class("col-span-4 space-y-8 border-r border-gray-100 pr-6")
                    .child(contact)
                    .child(skills)
                    .child(education),
            )
            .child(el("div").class("col-span-8 space-y-8").child(experience))
            .into(),
    ]
}

fn creative_education(e: &EducationEntry) -> Node {
    el("div")
        .class("mb-4 last:mb-0")
        .maybe(text_el("div", "font-bold text-gray-900 text-sm", &e.school))
        .maybe(
            date_range(&e.start_date, &e.end_date, " - ")
                .map(|d| el("div").class("text-xs text-gray-500 mb-1").text(d).into()),
        )
        .maybe(text_el("div", "text-xs font-semibold text-indigo-600", &e.degree))
        .into()
}

fn creative_experience(e: &ExperienceEntry) -> Node {
    el("div")
        .class("mb-8 relative pl-8 border-l-2 border-indigo-100 hover:border-indigo-300 transition-colors last:mb-0")
        .child(el("div").class(
            "absolute -left-[9px] top-0 w-4 h-4 rounded-full bg-white border-4 border-indigo-600",
        ))
        .child(
            el("div")
                .class("flex flex-col sm:flex-row sm:justify-between sm:items-baseline mb-2")
                .maybe(text_el("span", "text-xl font-bold text-gray-900", &e.company))
                .maybe(date_range(&e.start_date, &e.end_date, " - ").map(|d| {
                    el("span")
                        .class("text-xs font-bold bg-indigo-50 text-indigo-700 px-2 py-1 rounded")
                        .text(d)
                        .into()
                })),
        )
        .maybe(text_el("div", "text-indigo-600 font-bold mb-2", &e.role))
        .maybe(text_el(
            "div",
            "text-sm text-gray-600 leading-relaxed whitespace-pre-line",
            &e.description,
        ))
        .into()
}

// minimalist

fn minimalist(doc: &Document) -> Vec<Node> {
    let p = &doc.personal;

    let links: Vec<&str> = [p.linkedin.as_str(), p.website.as_str()]
        .into_iter()
        .filter_map(non_empty)
        .map(strip_scheme)
        .collect();
    let links = (!links.is_empty()).then(|| el("span").text(links.join(" / ")).into());

    let header = el("header")
        .class("mb-8 pb-8 border-b border-gray-200 flex justify-between items-start")
        .child(
            el("div")
                .class("flex-1")
                .child(
                    el("h1")
                        .class("text-3xl font-medium tracking-tight text-gray-900 mb-2")
                        .text(&p.full_name),
                )
                .maybe(text_el("p", "text-lg text-gray-500 mb-4", &p.headline))
                .child(
                    el("div")
                        .class("flex flex-wrap gap-x-6 gap-y-2 text-sm text-gray-500 font-mono")
                        .maybe(text_el("span", "contact-email", &p.email))
                        .maybe(text_el("span", "contact-phone", &p.phone))
                        .maybe(text_el("span", "contact-location", &p.location))
                        .maybe(links),
                ),
        )
        .maybe(photo(
            p,
            "w-28 h-28 object-cover ml-6 grayscale opacity-90 border border-gray-200 p-1",
        ));

    let section = |title: &str, class: &'static str| -> Element {
        el("section").class(class).child(
            el("h2")
                .class("text-xs font-bold uppercase tracking-widest text-gray-400 mb-4")
                .text(title),
        )
    };

    let experience = section("Experience", "mb-8 resume-experience").child(
        el("div").class("space-y-6").children(doc.experience.iter().map(|e| {
            let title: Vec<&str> = [e.role.as_str(), e.company.as_str()]
                .into_iter()
                .filter_map(non_empty)
                .collect();
            el("div")
                .child(
                    el("div")
                        .class("flex justify-between items-baseline mb-1")
                        .maybe((!title.is_empty()).then(|| {
                            el("h3").class("font-medium text-gray-900").text(title.join(", ")).into()
                        }))
                        .maybe(date_range(&e.start_date, &e.end_date, " — ").map(|d| {
                            el("span").class("font-mono text-xs text-gray-400").text(d).into()
                        })),
                )
                .maybe(text_el(
                    "p",
                    "text-sm text-gray-600 leading-relaxed whitespace-pre-line",
                    &e.description,
                ))
                .into()
        })),
    );

    let education = section("Education", "mb-8 resume-education").child(
        el("div").class("space-y-4").children(doc.education.iter().map(|e| {
            el("div")
                .class("flex justify-between items-baseline")
                .child(
                    el("div")
                        .maybe(text_el("div", "font-medium text-gray-900", &e.school))
                        .maybe(text_el("div", "text-sm text-gray-600", &e.degree)),
                )
                .maybe(date_range(&e.start_date, &e.end_date, " — ").map(|d| {
                    el("span").class("font-mono text-xs text-gray-400").text(d).into()
                }))
                .into()
        })),
    );

    let skills = section("Skills", "resume-skills").child(
        el("p")
            .class("text-sm text-gray-600 leading-relaxed font-mono")
            .text(doc.skill_list().join(" • ")),
    );

    vec![el("div")
        .class("max-w-2xl mx-auto")
        .child(header)
        .child(experience)
        .child(education)
        .child(skills)
        .into()]
}
