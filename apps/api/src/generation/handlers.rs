//! Axum route handlers for generation, preview, and download.

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use bytes::Bytes;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::formatting::{format_sections, html::render_html, FormattedSection, RenderRequest};
use crate::generation::generator::{
    GenerateCoverLetterRequest, GenerateResumeRequest, GeneratedDocument, Generator,
};
use crate::models::{DocumentKind, DOCX_MIME};
use crate::session::handlers::session_not_found;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub sections: Vec<FormattedSection>,
    /// True when no header was recognised and renderers fall back to verbatim.
    pub verbatim: bool,
}

fn generator(state: &AppState) -> Generator<'_> {
    Generator {
        llm: state.llm.as_ref(),
        sessions: &state.sessions,
        catalog: &state.catalog,
        model: &state.config.llm_model,
    }
}

/// Builds the renderer input from a cached session.
fn render_request(state: &AppState, id: Uuid, kind: DocumentKind) -> Result<RenderRequest, AppError> {
    let entry = state.sessions.get(id).ok_or_else(|| session_not_found(id))?;

    let not_generated =
        || AppError::NotFound(format!("No {} generated for session {id}", kind.display_name()));
    let text = entry.document(kind).ok_or_else(not_generated)?;
    let profile = entry.profile.as_ref().ok_or_else(not_generated)?;

    Ok(RenderRequest::new(
        kind,
        profile.contact(),
        text,
        &state.catalog,
        Local::now().format("%B %d, %Y").to_string(),
    ))
}

/// Keeps the download file name safe inside a quoted header value.
fn attachment_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            ' ' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<GeneratedDocument>, AppError> {
    let document = generator(&state).generate_resume(request).await?;
    Ok(Json(document))
}

/// POST /api/v1/cover-letters/generate
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<GenerateCoverLetterRequest>,
) -> Result<Json<GeneratedDocument>, AppError> {
    let document = generator(&state).generate_cover_letter(request).await?;
    Ok(Json(document))
}

/// GET /api/v1/sessions/:id/:kind/preview
///
/// Re-renders the cached text; never calls the completion endpoint.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, DocumentKind)>,
) -> Result<Html<String>, AppError> {
    let request = render_request(&state, id, kind)?;
    let html = render_html(&request).map_err(anyhow::Error::from)?;
    Ok(Html(html))
}

/// GET /api/v1/sessions/:id/:kind/download
///
/// Returns the cached document as a `.docx` attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, DocumentKind)>,
) -> Result<impl IntoResponse, AppError> {
    let request = render_request(&state, id, kind)?;
    let file_name = kind.file_name(&request.contact.name);

    let writer = state.documents.clone();
    let bytes = tokio::task::spawn_blocking(move || writer.write(&request))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("document task panicked: {e}")))?
        .map_err(|e| AppError::Document(e.to_string()))?;

    info!(
        "Serving {} ({} bytes) for session {id}",
        file_name,
        bytes.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, attachment_disposition(&file_name)),
        ],
        Bytes::from(bytes),
    ))
}

/// POST /api/v1/format
///
/// Runs the section formatter on arbitrary text without calling the endpoint.
pub async fn handle_format(
    State(state): State<AppState>,
    Json(request): Json<FormatRequest>,
) -> Json<FormatResponse> {
    let sections = format_sections(&request.text, &state.catalog);
    Json(FormatResponse {
        verbatim: sections.is_empty(),
        sections,
    })
}
