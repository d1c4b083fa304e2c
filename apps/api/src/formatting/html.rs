//! HTML preview pages, rendered through askama templates under `templates/`.
//! Auto-escaping covers every piece of user and model text.

use askama::Template;

use crate::formatting::{DocumentBody, Fragment, RenderRequest};
use crate::models::{ContactDetails, DocumentKind};

#[derive(Template)]
#[template(path = "resume.html")]
pub struct ResumeTemplate<'a> {
    pub contact: &'a ContactDetails,
    pub body: &'a DocumentBody,
}

#[derive(Template)]
#[template(path = "cover_letter.html")]
pub struct CoverLetterTemplate<'a> {
    pub contact: &'a ContactDetails,
    pub date: &'a str,
    pub body: &'a DocumentBody,
}

/// Renders the preview page for either document kind.
pub fn render_html(request: &RenderRequest) -> Result<String, askama::Error> {
    match request.kind {
        DocumentKind::Resume => ResumeTemplate {
            contact: &request.contact,
            body: &request.body,
        }
        .render(),
        DocumentKind::CoverLetter => CoverLetterTemplate {
            contact: &request.contact,
            date: &request.date,
            body: &request.body,
        }
        .render(),
    }
}
