//! Generation pipeline — validate → build prompt → completion call → cache.
//!
//! Validation happens before the endpoint is touched. Nothing is cached unless
//! the completion call succeeds, and a failed call is never retried.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::formatting::{format_sections, FormattedSection, SectionCatalog};
use crate::generation::prompts::{
    build_cover_letter_prompt, build_resume_prompt, generation_params,
};
use crate::llm_client::CompletionClient;
use crate::models::{CompanyInfo, DocumentKind, UserProfile};
use crate::session::SessionStore;

/// Request body for resume generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResumeRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub profile: UserProfile,
}

/// Request body for cover-letter generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateCoverLetterRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub profile: UserProfile,
    pub company: CompanyInfo,
}

/// Result of one successful generation.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub session_id: Uuid,
    pub kind: DocumentKind,
    pub content: String,
    /// Structured view of `content`; empty for cover letters and for
    /// resumes without recognisable headers.
    pub sections: Vec<FormattedSection>,
}

/// Collaborators the pipeline needs, borrowed from `AppState`.
pub struct Generator<'a> {
    pub llm: &'a dyn CompletionClient,
    pub sessions: &'a SessionStore,
    pub catalog: &'a SectionCatalog,
    pub model: &'a str,
}

fn require_fields(profile: &UserProfile, company: Option<&CompanyInfo>) -> Result<(), AppError> {
    let mut missing = profile.missing_required_fields();
    if company.is_some_and(|c| c.company_name.trim().is_empty()) {
        missing.push("company_name");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Please fill in all required fields: {}",
            missing.join(", ")
        )))
    }
}

impl Generator<'_> {
    /// Unknown or expired session ids are rejected before any endpoint call.
    fn resolve_session(&self, session_id: Option<Uuid>) -> Result<Uuid, AppError> {
        match session_id {
            Some(id) if self.sessions.contains(id) => Ok(id),
            Some(id) => Err(AppError::NotFound(format!(
                "Session {id} not found or expired"
            ))),
            None => Ok(Uuid::new_v4()),
        }
    }

    async fn complete(&self, kind: DocumentKind, prompt: &str) -> Result<String, AppError> {
        let params = generation_params(kind, self.model);
        self.llm
            .generate(prompt, &params)
            .await
            .map_err(|e| AppError::Llm(format!("Error generating {}: {e}", kind.display_name())))
    }

    pub async fn generate_resume(
        &self,
        request: GenerateResumeRequest,
    ) -> Result<GeneratedDocument, AppError> {
        require_fields(&request.profile, None)?;
        let session_id = self.resolve_session(request.session_id)?;

        info!("Generating resume for session {session_id}");
        let prompt = build_resume_prompt(&request.profile);
        let content = self.complete(DocumentKind::Resume, &prompt).await?;

        let sections = format_sections(&content, self.catalog);
        info!(
            "Resume generated for session {session_id}: {} chars, {} sections",
            content.len(),
            sections.len()
        );

        self.sessions
            .store_resume(session_id, request.profile, content.clone());

        Ok(GeneratedDocument {
            session_id,
            kind: DocumentKind::Resume,
            content,
            sections,
        })
    }

    pub async fn generate_cover_letter(
        &self,
        request: GenerateCoverLetterRequest,
    ) -> Result<GeneratedDocument, AppError> {
        require_fields(&request.profile, Some(&request.company))?;
        let session_id = self.resolve_session(request.session_id)?;

        info!(
            "Generating cover letter for session {session_id} (company: {})",
            request.company.company_name.trim()
        );
        let prompt = build_cover_letter_prompt(&request.profile, &request.company);
        let content = self.complete(DocumentKind::CoverLetter, &prompt).await?;

        self.sessions.store_cover_letter(
            session_id,
            request.profile,
            request.company,
            content.clone(),
        );

        Ok(GeneratedDocument {
            session_id,
            kind: DocumentKind::CoverLetter,
            content,
            sections: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubCompletionClient;
    use crate::models::profile::fixtures::{company, complete_profile};

    const RESUME_TEXT: &str =
        "PROFESSIONAL SUMMARY\nBackend engineer.\n\nSKILLS\n- Rust\n- SQL";

    fn generator<'a>(
        llm: &'a StubCompletionClient,
        sessions: &'a SessionStore,
        catalog: &'a SectionCatalog,
    ) -> Generator<'a> {
        Generator {
            llm,
            sessions,
            catalog,
            model: "test-model",
        }
    }

    #[tokio::test]
    async fn test_generate_resume_caches_result_and_returns_sections() {
        let llm = StubCompletionClient::replying(RESUME_TEXT);
        let sessions = SessionStore::from_secs(3600);
        let catalog = SectionCatalog::default();

        let doc = generator(&llm, &sessions, &catalog)
            .generate_resume(GenerateResumeRequest {
                session_id: None,
                profile: complete_profile(),
            })
            .await
            .unwrap();

        assert_eq!(doc.kind, DocumentKind::Resume);
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[1].label, "SKILLS");

        let entry = sessions.get(doc.session_id).unwrap();
        assert_eq!(entry.document(DocumentKind::Resume), Some(RESUME_TEXT));

        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.model, "test-model");
        assert_eq!(calls[0].1.max_tokens, 1500);
    }

    #[tokio::test]
    async fn test_missing_fields_fail_before_endpoint_call() {
        let llm = StubCompletionClient::replying(RESUME_TEXT);
        let sessions = SessionStore::from_secs(3600);
        let catalog = SectionCatalog::default();

        let profile = UserProfile {
            name: String::new(),
            skills: "  ".to_string(),
            ..complete_profile()
        };
        let err = generator(&llm, &sessions, &catalog)
            .generate_resume(GenerateResumeRequest {
                session_id: None,
                profile,
            })
            .await
            .unwrap_err();

        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("skills"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(llm.call_count(), 0);
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_cover_letter_requires_company_name() {
        let llm = StubCompletionClient::replying("Dear team,");
        let sessions = SessionStore::from_secs(3600);
        let catalog = SectionCatalog::default();

        let err = generator(&llm, &sessions, &catalog)
            .generate_cover_letter(GenerateCoverLetterRequest {
                session_id: None,
                profile: complete_profile(),
                company: CompanyInfo {
                    company_name: " ".to_string(),
                    ..company()
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("company_name")));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_endpoint_failure_leaves_session_untouched() {
        let sessions = SessionStore::from_secs(3600);
        let catalog = SectionCatalog::default();
        let session_id = sessions.create();

        let ok = StubCompletionClient::replying("first");
        generator(&ok, &sessions, &catalog)
            .generate_resume(GenerateResumeRequest {
                session_id: Some(session_id),
                profile: complete_profile(),
            })
            .await
            .unwrap();

        let failing = StubCompletionClient::failing(429);
        let err = generator(&failing, &sessions, &catalog)
            .generate_resume(GenerateResumeRequest {
                session_id: Some(session_id),
                profile: UserProfile {
                    job_role: "Manager".to_string(),
                    ..complete_profile()
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Llm(ref m) if m.starts_with("Error generating resume")));
        assert_eq!(failing.call_count(), 1, "failures are not retried");

        let entry = sessions.get(session_id).unwrap();
        assert_eq!(entry.document(DocumentKind::Resume), Some("first"));
        assert_eq!(entry.profile.unwrap().job_role, "Backend Engineer");
    }

    #[tokio::test]
    async fn test_unknown_session_is_rejected_before_endpoint_call() {
        let llm = StubCompletionClient::replying(RESUME_TEXT);
        let sessions = SessionStore::from_secs(3600);
        let catalog = SectionCatalog::default();

        let err = generator(&llm, &sessions, &catalog)
            .generate_resume(GenerateResumeRequest {
                session_id: Some(Uuid::new_v4()),
                profile: complete_profile(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_cover_letter_caches_company() {
        let llm = StubCompletionClient::replying("Dear Ms. Lumbergh,\n\nI am applying.");
        let sessions = SessionStore::from_secs(3600);
        let catalog = SectionCatalog::default();

        let doc = generator(&llm, &sessions, &catalog)
            .generate_cover_letter(GenerateCoverLetterRequest {
                session_id: None,
                profile: complete_profile(),
                company: company(),
            })
            .await
            .unwrap();

        assert!(doc.sections.is_empty());
        let entry = sessions.get(doc.session_id).unwrap();
        assert_eq!(entry.company.unwrap().company_name, "Initech");
        assert!(entry.resume.is_none());
        assert_eq!(llm.calls.lock().unwrap()[0].1.max_tokens, 1200);
    }
}
