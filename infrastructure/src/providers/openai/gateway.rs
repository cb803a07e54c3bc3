//! OpenAI-compatible gateway
//!
//! Talks to any `POST {base_url}/chat/completions` endpoint (Poe, OpenAI,
//! local servers) with a bearer key.

use super::session::OpenAiSession;
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use reqwest::Client;
use roundtable_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use roundtable_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errors while setting up the provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no API key: set the {env} environment variable or provider.api_key")]
    MissingApiKey { env: String },

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct OpenAiGateway {
    client: Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
}

impl OpenAiGateway {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        info!("Model gateway: {}", endpoint);
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into().into(),
        })
    }

    pub fn from_config(config: &FileProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ProviderError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;
        Self::new(
            &config.base_url,
            api_key,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.endpoint),
            Arc::clone(&self.api_key),
            model.clone(),
            system_prompt.to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway =
            OpenAiGateway::new("https://api.poe.com/v1/", "k", Duration::from_secs(5)).unwrap();
        assert_eq!(gateway.endpoint(), "https://api.poe.com/v1/chat/completions");
    }

    #[test]
    fn test_missing_key_is_reported() {
        let config = FileProviderConfig {
            api_key_env: "ROUNDTABLE_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            OpenAiGateway::from_config(&config),
            Err(ProviderError::MissingApiKey { env }) if env == "ROUNDTABLE_TEST_UNSET_KEY_VAR"
        ));
    }

    #[tokio::test]
    async fn test_sessions_keep_model() {
        let gateway = OpenAiGateway::new("http://localhost:1", "k", Duration::from_secs(1)).unwrap();
        let session = gateway
            .create_session_with_system_prompt(&Model::new("GPT-4o"), "system")
            .await
            .unwrap();
        assert_eq!(session.model().as_str(), "GPT-4o");
    }
}
