//! Document writer — turns a `RenderRequest` into a downloadable file.
//!
//! Default: `DocxWriter` (docx-rs). Packing is CPU-bound; callers run it
//! inside `tokio::task::spawn_blocking`.

pub mod docx;

use thiserror::Error;

use crate::formatting::RenderRequest;

pub use docx::DocxWriter;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to pack document: {0}")]
    Pack(String),
}

/// The document-writing collaborator. Carried in `AppState` as
/// `Arc<dyn DocumentWriter>`.
pub trait DocumentWriter: Send + Sync {
    fn write(&self, request: &RenderRequest) -> Result<Vec<u8>, DocumentError>;
}
