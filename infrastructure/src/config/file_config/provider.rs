//! Model provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Environment variable holding the API key (default: "POE_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Reply length cap for relevance checks.
    pub relevance_max_tokens: u32,
    /// Reply length cap for summaries.
    pub summary_max_tokens: u32,
    /// HTTP request timeout in seconds, applied below the meeting timeouts.
    pub request_timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.poe.com/v1".to_string(),
            api_key_env: "POE_API_KEY".to_string(),
            api_key: None,
            relevance_max_tokens: 150,
            summary_max_tokens: 500,
            request_timeout_seconds: 600,
        }
    }
}

impl FileProviderConfig {
    /// Resolve the API key: direct key first, then the environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
