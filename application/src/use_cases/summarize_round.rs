//! Round summarization
//!
//! Produces the meeting notes for a closed round with a single bounded call
//! to the notes model.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::shared::{Invocation, InvocationKind, InvocationRequest, invoke_bounded};
use roundtable_domain::{Model, PromptTemplate, Round, Summary, render_round};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Why a summary could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("summary timed out")]
    TimedOut,

    #[error("summary failed: {0}")]
    Failed(GatewayError),

    #[error("notes model returned an empty summary")]
    Empty,

    #[error("summary cancelled")]
    Cancelled,
}

/// Notes-model summarizer
pub struct Summarizer<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
    timeout: Duration,
    max_tokens: Option<u32>,
}

impl<G: LlmGateway + 'static> Summarizer<G> {
    pub fn new(gateway: Arc<G>, model: Model, timeout: Duration) -> Self {
        Self {
            gateway,
            model,
            timeout,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub async fn summarize(
        &self,
        meeting_title: &str,
        round: &Round,
        cancel: &CancellationToken,
    ) -> Result<Summary, SummaryError> {
        let prompt = PromptTemplate::notes_prompt(meeting_title, &render_round(round));
        let request = InvocationRequest {
            kind: InvocationKind::Summary,
            model: &self.model,
            system_prompt: PromptTemplate::notes_system(),
            prompt: &prompt,
            max_tokens: self.max_tokens,
            timeout: self.timeout,
        };

        let result = match invoke_bounded(self.gateway.as_ref(), request, cancel).await {
            Invocation::Completed(text) if text.trim().is_empty() => Err(SummaryError::Empty),
            Invocation::Completed(text) => Ok(Summary::new(text.trim())),
            Invocation::TimedOut => Err(SummaryError::TimedOut),
            Invocation::Failed(e) => Err(SummaryError::Failed(e)),
            Invocation::Cancelled => Err(SummaryError::Cancelled),
        };

        match &result {
            Ok(_) => info!("Round {} summarized", round.index),
            Err(e) => warn!("Round {} has no summary: {}", round.index, e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Script, ScriptedGateway};
    use roundtable_domain::{OpenRound, RoundOutcome};

    fn closed_round() -> Round {
        let mut open = OpenRound::new(1, "Budget?");
        open.push_turn("alice", "Cut travel.");
        open.close(RoundOutcome::Completed, None)
    }

    fn summarizer(gateway: ScriptedGateway) -> Summarizer<ScriptedGateway> {
        Summarizer::new(Arc::new(gateway), Model::new("notes"), Duration::from_secs(30))
    }

    #[tokio::test(start_paused = true)]
    async fn test_summary_is_trimmed() {
        let gateway = ScriptedGateway::new().summary(Script::reply("\n- Cut travel\n"));
        let shared = gateway.clone();
        let summary = summarizer(gateway)
            .with_max_tokens(Some(500))
            .summarize("Budget", &closed_round(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.as_str(), "- Cut travel");
        let calls = shared.calls();
        assert_eq!(calls[0].model, "notes");
        assert_eq!(calls[0].max_tokens, Some(500));
        assert!(calls[0].prompt.contains("[alice]: Cut travel."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_summary_is_an_error() {
        let gateway = ScriptedGateway::new().summary(Script::reply("   "));
        let result = summarizer(gateway)
            .summarize("Budget", &closed_round(), &CancellationToken::new())
            .await;
        assert_eq!(result, Err(SummaryError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_summary_times_out() {
        let gateway = ScriptedGateway::new().summary(Script::Hang);
        let result = summarizer(gateway)
            .summarize("Budget", &closed_round(), &CancellationToken::new())
            .await;
        assert_eq!(result, Err(SummaryError::TimedOut));
    }

    #[tokio::test(start_paused = true)]
    async fn test_summary_failure_carries_gateway_error() {
        let gateway = ScriptedGateway::new()
            .summary(Script::Fail(GatewayError::ModelNotAvailable("notes".into())));
        let result = summarizer(gateway)
            .summarize("Budget", &closed_round(), &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(SummaryError::Failed(GatewayError::ModelNotAvailable(_)))));
    }
}
