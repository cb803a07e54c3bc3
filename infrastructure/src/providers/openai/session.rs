//! OpenAI-compatible LLM session
//!
//! Each `send` is one stateless chat completion carrying the session's
//! system prompt and the given user message.

use super::types::{ChatCompletionRequest, parse_completion, status_error};
use async_trait::async_trait;
use reqwest::Client;
use roundtable_application::ports::llm_gateway::{GatewayError, LlmSession};
use roundtable_domain::Model;
use std::sync::Arc;
use tracing::debug;

pub struct OpenAiSession {
    client: Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
    model: Model,
    system_prompt: String,
}

impl OpenAiSession {
    pub(crate) fn new(
        client: Client,
        endpoint: Arc<str>,
        api_key: Arc<str>,
        model: Model,
        system_prompt: String,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
            system_prompt,
        }
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.send_with_max_tokens(content, None).await
    }

    async fn send_with_max_tokens(
        &self,
        content: &str,
        max_tokens: Option<u32>,
    ) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest::new(
            self.model.as_str(),
            &self.system_prompt,
            content,
            max_tokens,
        );

        debug!(model = %self.model, ?max_tokens, "Calling chat completions");

        let response = self
            .client
            .post(self.endpoint.as_ref())
            .bearer_auth(self.api_key.as_ref())
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), self.model.as_str(), &body));
        }

        parse_completion(&body)
    }
}
