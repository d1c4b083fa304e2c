//! LLM Client — the single point of entry for completion-endpoint calls in Quill.
//!
//! Handlers and the generation pipeline only see the `CompletionClient` trait;
//! `LlmClient` is the production implementation speaking the OpenAI-compatible
//! chat-completions wire format (Groq by default).
//!
//! No retries: a failed call is terminal for that request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Default chat-completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The completion endpoint as the rest of the crate sees it.
///
/// Carried in `AppState` as `Arc<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if it carries any non-blank content.
    pub fn into_text(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Pulls `error.message` out of an error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// reqwest-backed chat-completions client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &params.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                params.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.into_text()
    }
}
