//! Meeting session
//!
//! Drives a meeting one round at a time: relevance poll, turn scheduling,
//! summary, persistence. A [`SessionControl`] handle lets another task
//! interrupt the running round or end the meeting.

use crate::config::SessionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::MeetingProgressNotifier;
use crate::ports::transcript_store::{StoreError, TranscriptStore};
use crate::use_cases::poll_relevance::{PollOutcome, RelevancePoller};
use crate::use_cases::run_round::{ScheduledRound, SkippedTurn, TurnScheduler};
use crate::use_cases::summarize_round::Summarizer;
use roundtable_domain::{
    DomainError, Meeting, MeetingId, MeetingPhase, RelevanceVotes, Round, RoundOutcome,
    render_transcript,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors returned by the meeting session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("the meeting has ended")]
    Closed,

    #[error("message is empty")]
    EmptyMessage,

    #[error("round {0} is not persisted yet; retry or discard it first")]
    PendingRound(u32),

    #[error("no round is waiting to be persisted")]
    NothingPending,

    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Non-fatal problems encountered while closing a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionWarning {
    SummaryUnavailable(String),
}

impl std::fmt::Display for SessionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionWarning::SummaryUnavailable(reason) => {
                write!(f, "summary unavailable: {}", reason)
            }
        }
    }
}

/// A persisted round and what happened while producing it
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub round: Round,
    pub warnings: Vec<SessionWarning>,
    pub skipped: Vec<SkippedTurn>,
}

impl RoundReport {
    pub fn is_interrupted(&self) -> bool {
        self.round.is_interrupted()
    }
}

/// Handle for interrupting a session from another task.
///
/// Each round runs under a child of the quit token, so quitting also
/// interrupts the round in progress.
#[derive(Debug, Clone, Default)]
pub struct SessionControl {
    quit: CancellationToken,
    round: Arc<Mutex<Option<CancellationToken>>>,
}

impl SessionControl {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin_round(&self) -> CancellationToken {
        let token = self.quit.child_token();
        *self.round.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.clone());
        token
    }

    fn end_round(&self) {
        *self.round.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Interrupt the running round. Returns `false` when no round is running.
    pub fn cancel_current_round(&self) -> bool {
        match self.round.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// End the meeting after the current round (if any) is persisted.
    pub fn quit(&self) {
        self.quit.cancel();
    }

    pub fn is_quit(&self) -> bool {
        self.quit.is_cancelled()
    }

    pub fn is_round_active(&self) -> bool {
        self.round
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

struct PendingRound {
    round: Round,
    warnings: Vec<SessionWarning>,
    skipped: Vec<SkippedTurn>,
}

/// Orchestrates one meeting
pub struct MeetingSession<G: LlmGateway + 'static> {
    meeting: Meeting,
    store: Arc<dyn TranscriptStore>,
    poller: RelevancePoller<G>,
    scheduler: TurnScheduler<G>,
    summarizer: Summarizer<G>,
    logger: Arc<dyn ConversationLogger>,
    control: SessionControl,
    phase: MeetingPhase,
    pending: Option<PendingRound>,
}

impl<G: LlmGateway + 'static> MeetingSession<G> {
    /// Persist a new meeting and open a session on it.
    pub fn start(
        gateway: Arc<G>,
        store: Arc<dyn TranscriptStore>,
        meeting: Meeting,
        params: SessionParams,
    ) -> Result<Self, SessionError> {
        meeting.validate()?;
        store.create(&meeting)?;
        info!("Meeting {} created", meeting.id());
        Ok(Self::with_meeting(gateway, store, meeting, params))
    }

    /// Open a session on a persisted meeting. Rounds always start fresh.
    pub fn resume(
        gateway: Arc<G>,
        store: Arc<dyn TranscriptStore>,
        meeting_id: &MeetingId,
        params: SessionParams,
    ) -> Result<Self, SessionError> {
        let meeting = store.load(meeting_id)?;
        info!(
            "Meeting {} resumed at round {}",
            meeting.id(),
            meeting.next_round_index()
        );
        Ok(Self::with_meeting(gateway, store, meeting, params))
    }

    fn with_meeting(
        gateway: Arc<G>,
        store: Arc<dyn TranscriptStore>,
        meeting: Meeting,
        params: SessionParams,
    ) -> Self {
        Self {
            meeting,
            store,
            poller: RelevancePoller::new(Arc::clone(&gateway))
                .with_max_tokens(params.relevance_max_tokens),
            scheduler: TurnScheduler::new(Arc::clone(&gateway)),
            summarizer: Summarizer::new(gateway, params.notes_model, params.summary_timeout)
                .with_max_tokens(params.summary_max_tokens),
            logger: Arc::new(NoConversationLogger),
            control: SessionControl::new(),
            phase: MeetingPhase::AwaitingInput,
            pending: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn meeting(&self) -> &Meeting {
        &self.meeting
    }

    pub fn phase(&self) -> MeetingPhase {
        self.phase
    }

    pub fn control(&self) -> SessionControl {
        self.control.clone()
    }

    /// Index of the round held after a failed write, if any.
    pub fn pending_round(&self) -> Option<u32> {
        self.pending.as_ref().map(|p| p.round.index)
    }

    /// Run one round for the moderator's `text`.
    ///
    /// Returns once the round is persisted, including when it was
    /// interrupted through [`SessionControl`].
    pub async fn submit_message(
        &mut self,
        text: &str,
        progress: &dyn MeetingProgressNotifier,
    ) -> Result<RoundReport, SessionError> {
        if self.phase == MeetingPhase::Quit {
            return Err(SessionError::Closed);
        }
        if let Some(index) = self.pending_round() {
            return Err(SessionError::PendingRound(index));
        }
        if self.control.is_quit() {
            self.set_phase(MeetingPhase::Quit, progress);
            return Err(SessionError::Closed);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let cancel = self.control.begin_round();
        let open = self.meeting.open_round(text);
        let index = open.index();
        let config = self.meeting.config().clone();

        info!("Round {} started", index);
        progress.on_round_start(index, self.meeting.roster().len());
        self.log(
            "round_started",
            json!({ "meeting": self.meeting.id(), "round": index, "message": text }),
        );

        self.set_phase(MeetingPhase::Polling, progress);
        let transcript = render_transcript(self.meeting.rounds(), &open);
        let outcome = self
            .poller
            .poll(
                self.meeting.title(),
                &transcript,
                self.meeting.roster(),
                config.relevance_timeout,
                &cancel,
                progress,
            )
            .await;
        self.log_votes(index, outcome.votes());

        let scheduled = match outcome {
            PollOutcome::Cancelled(_) => ScheduledRound {
                round: open,
                interrupted: true,
                skipped: Vec::new(),
            },
            PollOutcome::Completed(votes) => {
                self.set_phase(MeetingPhase::Scheduling, progress);
                self.scheduler
                    .run_round(
                        &self.meeting,
                        open,
                        &votes,
                        config.response_timeout,
                        config.max_turns_per_round,
                        &cancel,
                        progress,
                    )
                    .await
            }
        };
        self.log_turns(&scheduled);

        let mut warnings = Vec::new();
        let round = if scheduled.interrupted {
            self.set_phase(MeetingPhase::Interrupted, progress);
            scheduled.round.close(RoundOutcome::Interrupted, None)
        } else if scheduled.round.turn_count() == 0 {
            debug!("Round {} has no turns; not summarizing", index);
            scheduled.round.close(RoundOutcome::Completed, None)
        } else {
            self.set_phase(MeetingPhase::Summarizing, progress);
            let closed = scheduled.round.close(RoundOutcome::Completed, None);
            match self
                .summarizer
                .summarize(self.meeting.title(), &closed, &cancel)
                .await
            {
                Ok(summary) => {
                    progress.on_summary(index, &summary);
                    closed.with_summary(Some(summary))
                }
                Err(e) => {
                    self.log(
                        "summary_unavailable",
                        json!({ "round": index, "reason": e.to_string() }),
                    );
                    warnings.push(SessionWarning::SummaryUnavailable(e.to_string()));
                    closed
                }
            }
        };
        self.control.end_round();

        self.persist(
            PendingRound {
                round,
                warnings,
                skipped: scheduled.skipped,
            },
            progress,
        )
        .await
    }

    /// Write the round held after a failed persist again.
    pub async fn retry_persist(
        &mut self,
        progress: &dyn MeetingProgressNotifier,
    ) -> Result<RoundReport, SessionError> {
        let pending = self.pending.take().ok_or(SessionError::NothingPending)?;
        self.persist(pending, progress).await
    }

    /// Drop the round held after a failed persist. Its index is reused by
    /// the next round.
    pub fn discard_pending(&mut self) -> Result<Round, SessionError> {
        let pending = self.pending.take().ok_or(SessionError::NothingPending)?;
        warn!("Discarding unpersisted round {}", pending.round.index);
        self.phase = if self.control.is_quit() {
            MeetingPhase::Quit
        } else {
            MeetingPhase::AwaitingInput
        };
        Ok(pending.round)
    }

    /// End the meeting. A round still waiting to be persisted is lost.
    pub fn close(&mut self) {
        self.control.quit();
        if let Some(pending) = self.pending.take() {
            warn!(
                "Closing meeting with unpersisted round {}",
                pending.round.index
            );
        }
        self.phase = MeetingPhase::Quit;
        info!("Meeting {} closed", self.meeting.id());
    }

    /// Append `round` on the blocking pool; store writes sync to disk.
    async fn append_round(&self, round: &Round) -> Result<(), StoreError> {
        let store = Arc::clone(&self.store);
        let meeting_id = self.meeting.id().clone();
        let round = round.clone();
        tokio::task::spawn_blocking(move || store.append_closed_round(&meeting_id, &round))
            .await
            .map_err(|e| StoreError::Io(format!("store task failed: {}", e)))?
    }

    async fn persist(
        &mut self,
        pending: PendingRound,
        progress: &dyn MeetingProgressNotifier,
    ) -> Result<RoundReport, SessionError> {
        let index = pending.round.index;
        if let Err(e) = self.append_round(&pending.round).await {
            error!("Failed to persist round {}: {}", index, e);
            self.pending = Some(pending);
            self.set_phase(MeetingPhase::PersistFailed, progress);
            return Err(e.into());
        }

        self.meeting.push_round(pending.round.clone())?;
        self.set_phase(MeetingPhase::Persisted, progress);
        progress.on_round_closed(&pending.round);
        self.log(
            "round_closed",
            json!({
                "round": index,
                "outcome": pending.round.outcome,
                "turns": pending.round.turns.len(),
                "summary": pending.round.summary,
            }),
        );
        info!("Round {} persisted", index);

        let next = if self.control.is_quit() {
            MeetingPhase::Quit
        } else {
            MeetingPhase::AwaitingInput
        };
        self.set_phase(next, progress);

        Ok(RoundReport {
            round: pending.round,
            warnings: pending.warnings,
            skipped: pending.skipped,
        })
    }

    fn set_phase(&mut self, phase: MeetingPhase, progress: &dyn MeetingProgressNotifier) {
        debug_assert!(
            self.phase.can_transition_to(phase),
            "illegal transition {} -> {}",
            self.phase,
            phase
        );
        debug!("Phase {} -> {}", self.phase, phase);
        self.phase = phase;
        progress.on_phase(phase);
    }

    fn log(&self, event_type: &'static str, payload: serde_json::Value) {
        self.logger.log(ConversationEvent::new(event_type, payload));
    }

    fn log_votes(&self, index: u32, votes: &RelevanceVotes) {
        for participant in self.meeting.roster().registry_order() {
            if let Some(vote) = votes.get(&participant.name) {
                self.log(
                    "relevance_vote",
                    json!({
                        "round": index,
                        "participant": participant.name,
                        "decision": vote.tag(),
                        "note": vote.note(),
                    }),
                );
            }
        }
    }

    fn log_turns(&self, scheduled: &ScheduledRound) {
        let index = scheduled.round.index();
        for turn in scheduled.round.turns() {
            self.log(
                "turn_completed",
                json!({
                    "round": index,
                    "participant": turn.participant,
                    "position": turn.position,
                    "text": turn.text,
                }),
            );
        }
        for skip in &scheduled.skipped {
            self.log(
                "turn_skipped",
                json!({
                    "round": index,
                    "participant": skip.participant,
                    "reason": skip.reason.to_string(),
                }),
            );
        }
    }
}
