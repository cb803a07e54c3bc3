//! Shared utilities for use cases.
//!
//! Contains the bounded, cancellable model invocation used by the relevance
//! poller, the turn scheduler and the summarizer.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use roundtable_domain::Model;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What a model invocation is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    RelevanceCheck,
    FullResponse,
    Summary,
}

impl InvocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationKind::RelevanceCheck => "relevance_check",
            InvocationKind::FullResponse => "full_response",
            InvocationKind::Summary => "summary",
        }
    }
}

/// Result of a bounded invocation
#[derive(Debug)]
pub enum Invocation {
    Completed(String),
    TimedOut,
    Failed(GatewayError),
    Cancelled,
}

/// One model call to make.
pub(crate) struct InvocationRequest<'a> {
    pub kind: InvocationKind,
    pub model: &'a Model,
    pub system_prompt: &'a str,
    pub prompt: &'a str,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

/// Invoke a model, bounded by `request.timeout` and raced against `cancel`.
///
/// The call future (session creation plus send) is dropped as soon as the
/// timeout elapses or the token fires, which aborts the request; nothing
/// keeps running after this returns.
pub(crate) async fn invoke_bounded<G: LlmGateway + ?Sized>(
    gateway: &G,
    request: InvocationRequest<'_>,
    cancel: &CancellationToken,
) -> Invocation {
    if cancel.is_cancelled() {
        return Invocation::Cancelled;
    }

    let call = async {
        let session = gateway
            .create_session_with_system_prompt(request.model, request.system_prompt)
            .await?;
        session
            .send_with_max_tokens(request.prompt, request.max_tokens)
            .await
    };

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Invocation::Cancelled,
        result = tokio::time::timeout(request.timeout, call) => match result {
            Err(_) | Ok(Err(GatewayError::Timeout)) => Invocation::TimedOut,
            Ok(Ok(text)) => Invocation::Completed(text),
            Ok(Err(e)) => Invocation::Failed(e),
        },
    };

    debug!(
        "{} on {} finished: {}",
        request.kind.as_str(),
        request.model,
        match &outcome {
            Invocation::Completed(_) => "completed",
            Invocation::TimedOut => "timed out",
            Invocation::Failed(_) => "failed",
            Invocation::Cancelled => "cancelled",
        }
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Script, ScriptedGateway};

    fn request<'a>(model: &'a Model, timeout: Duration) -> InvocationRequest<'a> {
        InvocationRequest {
            kind: InvocationKind::FullResponse,
            model,
            system_prompt: "system",
            prompt: "speak",
            max_tokens: None,
            timeout,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed() {
        let gateway = ScriptedGateway::new().respond("m", Script::reply("hello"));
        let model = Model::new("m");
        let outcome =
            invoke_bounded(&gateway, request(&model, Duration::from_secs(1)), &CancellationToken::new())
                .await;
        assert!(matches!(outcome, Invocation::Completed(text) if text == "hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_and_drops_call() {
        let gateway = ScriptedGateway::new().respond("m", Script::Hang);
        let model = Model::new("m");
        let outcome =
            invoke_bounded(&gateway, request(&model, Duration::from_secs(5)), &CancellationToken::new())
                .await;
        assert!(matches!(outcome, Invocation::TimedOut));
        assert_eq!(gateway.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gateway_timeout_maps_to_timed_out() {
        let gateway =
            ScriptedGateway::new().respond("m", Script::Fail(GatewayError::Timeout));
        let model = Model::new("m");
        let outcome =
            invoke_bounded(&gateway, request(&model, Duration::from_secs(5)), &CancellationToken::new())
                .await;
        assert!(matches!(outcome, Invocation::TimedOut));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_reported() {
        let gateway = ScriptedGateway::new().respond(
            "m",
            Script::Fail(GatewayError::RequestFailed("boom".to_string())),
        );
        let model = Model::new("m");
        let outcome =
            invoke_bounded(&gateway, request(&model, Duration::from_secs(5)), &CancellationToken::new())
                .await;
        assert!(matches!(outcome, Invocation::Failed(GatewayError::RequestFailed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_never_calls_gateway() {
        let gateway = ScriptedGateway::new().respond("m", Script::reply("x"));
        let model = Model::new("m");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = invoke_bounded(&gateway, request(&model, Duration::from_secs(5)), &cancel).await;
        assert!(matches!(outcome, Invocation::Cancelled));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_in_flight_call() {
        let gateway = ScriptedGateway::new().respond("m", Script::Hang);
        let model = Model::new("m");
        let cancel = CancellationToken::new();

        let canceller = {
            let cancel = cancel.clone();
            let started = gateway.hang_started();
            tokio::spawn(async move {
                started.notified().await;
                cancel.cancel();
            })
        };

        let outcome =
            invoke_bounded(&gateway, request(&model, Duration::from_secs(3600)), &cancel).await;
        canceller.await.unwrap();

        assert!(matches!(outcome, Invocation::Cancelled));
        assert_eq!(gateway.in_flight(), 0);
    }
}
