use regex::Regex;
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::debug;

use super::fetch::RawDocument;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to extract text from PDF {0}: {1}")]
    Pdf(String, String),

    #[error("document {0} contains no text")]
    Empty(String),
}

/// What kind of payload a fetched document holds, decided from the
/// content-type hint first and the leading bytes second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Html,
    Text,
}

impl DocumentKind {
    pub fn detect(doc: &RawDocument) -> Self {
        if let Some(content_type) = &doc.content_type {
            let content_type = content_type.to_ascii_lowercase();
            if content_type.contains("application/pdf") {
                return Self::Pdf;
            }
            if content_type.contains("text/html") || content_type.contains("application/xhtml") {
                return Self::Html;
            }
        }
        if doc.bytes.starts_with(b"%PDF") {
            return Self::Pdf;
        }
        Self::Text
    }
}

/// Turn a fetched document into plain text suitable for prompting.
pub fn extract_text(doc: &RawDocument) -> Result<String, ExtractError> {
    let kind = DocumentKind::detect(doc);
    debug!(?kind, source = %doc.source, "extracting document text");

    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&doc.bytes)
            .map_err(|e| ExtractError::Pdf(doc.source.clone(), e.to_string()))?,
        DocumentKind::Html => html_to_text(&String::from_utf8_lossy(&doc.bytes)),
        DocumentKind::Text => String::from_utf8_lossy(&doc.bytes).into_owned(),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ExtractError::Empty(doc.source.clone()));
    }
    Ok(text)
}

fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    push_text(document.root_element(), &mut out);
    collapse_whitespace(&out)
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    // Non-content subtrees contribute markup, not prose.
    if matches!(
        element.value().name(),
        "head" | "script" | "style" | "noscript"
    ) {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            push_text(child_element, out);
        }
    }
    if matches!(
        element.value().name(),
        "p" | "br" | "div" | "li" | "tr" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    ) {
        out.push('\n');
    }
}

fn collapse_whitespace(text: &str) -> String {
    let spaces = Regex::new(r"[ \t]+").unwrap();
    let blank_runs = Regex::new(r"\n[ \t]*(\n[ \t]*)+").unwrap();
    let collapsed = spaces.replace_all(text, " ");
    blank_runs.replace_all(&collapsed, "\n\n").to_string()
}
