use std::sync::Arc;

use crate::config::Config;
use crate::documents::DocumentWriter;
use crate::formatting::SectionCatalog;
use crate::llm_client::CompletionClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion endpoint. Default: `LlmClient`; tests swap in a stub.
    pub llm: Arc<dyn CompletionClient>,
    /// Word-processor writer. Default: `DocxWriter`.
    pub documents: Arc<dyn DocumentWriter>,
    pub sessions: SessionStore,
    pub catalog: Arc<SectionCatalog>,
    pub config: Config,
}
