//! Turn scheduling
//!
//! Runs the speaking phase of a round: participants that asked to speak are
//! invoked one at a time, in priority order, each seeing every turn produced
//! before it.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::MeetingProgressNotifier;
use crate::use_cases::shared::{Invocation, InvocationKind, InvocationRequest, invoke_bounded};
use roundtable_domain::{Meeting, OpenRound, PromptTemplate, RelevanceVotes, render_transcript};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Why a participant produced no turn this round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TimedOut,
    Failed(String),
    EmptyResponse,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TimedOut => write!(f, "timed out"),
            SkipReason::Failed(e) => write!(f, "failed: {}", e),
            SkipReason::EmptyResponse => write!(f, "empty response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTurn {
    pub participant: String,
    pub reason: SkipReason,
}

/// The speaking phase's result, before summary and persistence
#[derive(Debug)]
pub struct ScheduledRound {
    pub round: OpenRound,
    /// Cancellation stopped the round before every speaker was heard.
    pub interrupted: bool,
    pub skipped: Vec<SkippedTurn>,
}

/// Sequential turn scheduler
pub struct TurnScheduler<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> TurnScheduler<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Invoke each participant that wants to speak, stopping after
    /// `max_turns` turns or on cancellation.
    ///
    /// Only completed responses become turns. The invocation in flight when
    /// `cancel` fires is dropped and never recorded.
    #[allow(clippy::too_many_arguments)]
    pub async fn run_round(
        &self,
        meeting: &Meeting,
        open_round: OpenRound,
        votes: &RelevanceVotes,
        response_timeout: Duration,
        max_turns: usize,
        cancel: &CancellationToken,
        progress: &dyn MeetingProgressNotifier,
    ) -> ScheduledRound {
        let order = votes.speaking_order(meeting.roster());
        progress.on_speaking_order(&order);
        info!(
            "Round {}: {} of {} participants speaking",
            open_round.index(),
            order.len(),
            meeting.roster().len()
        );

        let mut round = open_round;
        let mut skipped = Vec::new();
        let mut interrupted = false;

        for participant in order {
            if round.turn_count() >= max_turns {
                info!("Round {} reached {} turns", round.index(), max_turns);
                break;
            }
            if cancel.is_cancelled() {
                interrupted = true;
                break;
            }

            progress.on_turn_start(participant);

            let transcript = render_transcript(meeting.rounds(), &round);
            let system_prompt = PromptTemplate::participant_system(participant, meeting.title());
            let prompt = PromptTemplate::full_response(&participant.name, &transcript);
            let request = InvocationRequest {
                kind: InvocationKind::FullResponse,
                model: &participant.model,
                system_prompt: &system_prompt,
                prompt: &prompt,
                max_tokens: None,
                timeout: response_timeout,
            };

            let reason = match invoke_bounded(self.gateway.as_ref(), request, cancel).await {
                Invocation::Completed(text) if !text.trim().is_empty() => {
                    let turn = round.push_turn(participant.name.clone(), text.trim());
                    progress.on_turn_complete(turn);
                    continue;
                }
                Invocation::Completed(_) => SkipReason::EmptyResponse,
                Invocation::TimedOut => SkipReason::TimedOut,
                Invocation::Failed(e) => SkipReason::Failed(e.to_string()),
                Invocation::Cancelled => {
                    interrupted = true;
                    break;
                }
            };

            warn!("Skipping {} this round: {}", participant.name, reason);
            progress.on_turn_skipped(participant, &reason);
            skipped.push(SkippedTurn {
                participant: participant.name.clone(),
                reason,
            });
        }

        if interrupted {
            info!(
                "Round {} interrupted after {} turns",
                round.index(),
                round.turn_count()
            );
        }

        ScheduledRound {
            round,
            interrupted,
            skipped,
        }
    }
}
