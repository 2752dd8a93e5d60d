//! Export collaborator: turns the rendered preview into a downloadable file.
//!
//! `DocumentExporter` is carried in `AppState` as `Arc<dyn DocumentExporter>` so a real
//! rasterising backend can replace the printable-HTML default without touching handlers.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::Document;
use crate::view::node::{el, Node};

pub const DEFAULT_FILE_STEM: &str = "Resume";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to generate PDF. Please try \"Print to PDF\" instead.")]
    Render(String),
}

/// Page and raster settings handed to the exporter.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOptions {
    pub margin_mm: f32,
    pub image_quality: f32,
    pub scale: f32,
    pub format: &'static str,
    pub orientation: &'static str,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            margin_mm: 0.0,
            image_quality: 0.98,
            scale: 2.0,
            format: "a4",
            orientation: "portrait",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// File stem from the résumé title: ASCII alphanumerics only, `Resume` when nothing is left.
pub fn file_stem(title: &str) -> String {
    let stem: String = title.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if stem.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        stem
    }
}

#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// `markup` is the serialised preview root for `doc`.
    async fn export(
        &self,
        doc: &Document,
        markup: &str,
        options: &ExportOptions,
    ) -> Result<ExportedFile, ExportError>;

    fn backend_name(&self) -> &'static str;
}

/// Self-contained print-ready HTML; the browser's print dialog produces the PDF.
pub struct PrintableHtmlExporter;

impl PrintableHtmlExporter {
    fn page_style(options: &ExportOptions) -> String {
        format!(
            "@page {{ size: {} {}; margin: {}mm; }}\n\
             html, body {{ margin: 0; padding: 0; }}\n\
             #resume-preview-content {{ zoom: {}; }}\n\
             img {{ image-rendering: auto; }}\n\
             @media screen {{ body {{ background: #f3f4f6; }} }}\n",
            options.format.to_uppercase(),
            options.orientation,
            options.margin_mm,
            options.scale / 2.0,
        )
    }
}

#[async_trait]
impl DocumentExporter for PrintableHtmlExporter {
    async fn export(
        &self,
        doc: &Document,
        markup: &str,
        options: &ExportOptions,
    ) -> Result<ExportedFile, ExportError> {
        if markup.trim().is_empty() {
            return Err(ExportError::Render("nothing to export".to_string()));
        }
        let stem = file_stem(&doc.resume_title);
        let head: Node = el("head")
            .child(el("meta").attr("charset", "utf-8"))
            .child(el("title").text(stem.clone()))
            .child(el("script").attr("src", "https://cdn.tailwindcss.com"))
            .child(el("style").text(Self::page_style(options)))
            .into();

        // `markup` comes from the view layer and is already escaped.
        let html = format!(
            "<!DOCTYPE html>\n<html>{}<body onload=\"window.print()\">{markup}</body></html>",
            head.render()
        );

        Ok(ExportedFile {
            filename: format!("{stem}.html"),
            content_type: "text/html; charset=utf-8",
            bytes: html.into_bytes(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "printable-html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Jane Roe - CV (2024)"), "JaneRoeCV2024");
        assert_eq!(file_stem(""), "Resume");
        assert_eq!(file_stem("!!! ---"), "Resume");
        assert_eq!(file_stem("Müller CV"), "MllerCV");
    }

    #[tokio::test]
    async fn test_printable_export_embeds_markup() {
        let mut doc = Document::sample();
        doc.resume_title = "John's CV".to_string();
        let markup = view::render_html(&doc);
        let file = PrintableHtmlExporter
            .export(&doc, &markup, &ExportOptions::default())
            .await
            .unwrap();

        assert_eq!(file.filename, "JohnsCV.html");
        let html = String::from_utf8(file.bytes).unwrap();
        assert!(html.contains("size: A4 portrait; margin: 0mm;"));
        assert!(html.contains(&markup));
    }

    #[tokio::test]
    async fn test_empty_markup_fails_with_fallback_message() {
        let err = PrintableHtmlExporter
            .export(&Document::sample(), "  ", &ExportOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Print to PDF"));
    }
}
