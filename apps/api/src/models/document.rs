use serde::{Deserialize, Serialize};

/// MIME type of the downloadable word-processor document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The two documents the service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// Human-readable name used in messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover letter",
        }
    }

    /// `{name}_Resume.docx` or `{name}_Cover_Letter.docx`.
    pub fn file_name(&self, name: &str) -> String {
        let suffix = match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "Cover_Letter",
        };
        format!("{}_{suffix}.docx", name.trim())
    }
}
