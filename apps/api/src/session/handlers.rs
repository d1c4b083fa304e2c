use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CompanyInfo, DocumentKind, UserProfile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub profile: Option<UserProfile>,
    pub company: Option<CompanyInfo>,
    pub has_resume: bool,
    pub has_cover_letter: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found or expired"))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create();
    info!("Created session {session_id}");
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    let entry = state.sessions.get(id).ok_or_else(|| session_not_found(id))?;

    Ok(Json(SessionSummary {
        session_id: id,
        has_resume: entry.document(DocumentKind::Resume).is_some(),
        has_cover_letter: entry.document(DocumentKind::CoverLetter).is_some(),
        profile: entry.profile,
        company: entry.company,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id) {
        info!("Deleted session {id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}
