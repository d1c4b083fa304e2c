pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route(
            "/api/v1/sessions",
            post(session_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(session_handlers::handle_get_session)
                .delete(session_handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/:kind/preview",
            get(handlers::handle_preview),
        )
        .route(
            "/api/v1/sessions/:id/:kind/download",
            get(handlers::handle_download),
        )
        // Generation
        .route(
            "/api/v1/resumes/generate",
            post(handlers::handle_generate_resume),
        )
        .route(
            "/api/v1/cover-letters/generate",
            post(handlers::handle_generate_cover_letter),
        )
        // Formatter only, no endpoint call
        .route("/api/v1/format", post(handlers::handle_format))
        .with_state(state)
}
