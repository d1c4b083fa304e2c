// Section Formatter: splits generated resume text into sections and re-flows
// each body into paragraphs and bullet lists for the html preview and the
// docx writer. Cover letters keep their line structure. Pure and synchronous.

pub mod body;
pub mod catalog;
pub mod html;
pub mod splitter;

use serde::Serialize;

pub use body::{format_body, FormattedBlock, Fragment};
pub use catalog::{SectionCatalog, DEFAULT_HEADER_MAX_CHARS};
pub use splitter::split_sections;

use crate::models::{ContactDetails, DocumentKind};

/// A section label with its formatted body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSection {
    pub label: String,
    pub fragments: FormattedBlock,
}

/// What a renderer lays out below the document header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBody {
    /// Resume text with recognised section headers.
    Sections(Vec<FormattedSection>),
    /// Cover-letter text with its line breaks intact, trimmed at both ends.
    Letter(String),
    /// Resume text with no recognisable headers, shown as-is.
    Verbatim(String),
}

/// Everything both renderers need for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub kind: DocumentKind,
    pub contact: ContactDetails,
    /// Pre-formatted date line, printed on cover letters.
    pub date: String,
    pub body: DocumentBody,
}

impl RenderRequest {
    pub fn new(
        kind: DocumentKind,
        contact: ContactDetails,
        text: &str,
        catalog: &SectionCatalog,
        date: String,
    ) -> Self {
        Self {
            kind,
            contact,
            date,
            body: layout_body(kind, text, catalog),
        }
    }
}

/// Splits `text` and formats every section body, preserving section order.
pub fn format_sections(text: &str, catalog: &SectionCatalog) -> Vec<FormattedSection> {
    split_sections(text, catalog)
        .iter()
        .map(|entry| FormattedSection {
            label: entry.label.clone(),
            fragments: format_body(&entry.body),
        })
        .collect()
}

/// Chooses the body layout for a generated document.
pub fn layout_body(kind: DocumentKind, text: &str, catalog: &SectionCatalog) -> DocumentBody {
    match kind {
        DocumentKind::CoverLetter => DocumentBody::Letter(text.trim().to_string()),
        DocumentKind::Resume => {
            let sections = format_sections(text, catalog);
            if sections.is_empty() {
                DocumentBody::Verbatim(text.trim().to_string())
            } else {
                DocumentBody::Sections(sections)
            }
        }
    }
}
