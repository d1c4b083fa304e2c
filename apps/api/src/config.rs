use anyhow::{Context, Result};

use crate::formatting::DEFAULT_HEADER_MAX_CHARS;
use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Seconds since the last write after which a session is dropped.
    pub session_ttl_secs: u64,
    /// Header length guard for the section splitter.
    pub header_max_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_api_url: env_or("LLM_API_URL", DEFAULT_API_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_MODEL),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            session_ttl_secs: parse_env("SESSION_TTL_SECS", 3600)?,
            header_max_chars: parse_env("HEADER_MAX_CHARS", DEFAULT_HEADER_MAX_CHARS)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            llm_api_key: "test-key".to_string(),
            llm_api_url: DEFAULT_API_URL.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            session_ttl_secs: 3600,
            header_max_chars: DEFAULT_HEADER_MAX_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("QUILL_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("QUILL_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("QUILL_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        std::env::remove_var("QUILL_TEST_BAD_PORT");
    }
}
