// Resume and cover-letter generation: prompt building, validation, the
// completion call, and session caching. All endpoint calls go through
// llm_client::CompletionClient.

pub mod generator;
pub mod handlers;
pub mod prompts;
