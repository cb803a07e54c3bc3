//! Relevance poll
//!
//! Asks every participant, concurrently, whether it has something to add to
//! the discussion. The poll ends when every participant has answered or
//! timed out, or when the round is cancelled.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::MeetingProgressNotifier;
use crate::use_cases::shared::{Invocation, InvocationKind, InvocationRequest, invoke_bounded};
use roundtable_domain::{
    ParticipantRoster, PromptTemplate, RelevanceVote, RelevanceVotes, parse_relevance_reply,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How a relevance poll ended
#[derive(Debug)]
pub enum PollOutcome {
    /// Every participant answered, declined, failed or timed out.
    Completed(RelevanceVotes),
    /// The round was cancelled; holds the votes collected so far.
    Cancelled(RelevanceVotes),
}

impl PollOutcome {
    pub fn votes(&self) -> &RelevanceVotes {
        match self {
            PollOutcome::Completed(votes) | PollOutcome::Cancelled(votes) => votes,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PollOutcome::Cancelled(_))
    }
}

/// Fans a relevance check out to all participants of a meeting.
pub struct RelevancePoller<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    max_tokens: Option<u32>,
}

impl<G: LlmGateway + 'static> RelevancePoller<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            max_tokens: None,
        }
    }

    /// Cap the length of relevance replies.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Poll every participant in `roster` against `transcript`.
    ///
    /// At most one invocation per participant is in flight, and none remain
    /// once this returns. A participant whose invocation fails is recorded
    /// as declining, with the failure as its reason.
    pub async fn poll(
        &self,
        meeting_title: &str,
        transcript: &str,
        roster: &ParticipantRoster,
        relevance_timeout: Duration,
        cancel: &CancellationToken,
        progress: &dyn MeetingProgressNotifier,
    ) -> PollOutcome {
        info!("Polling {} participants for relevance", roster.len());

        let mut join_set = JoinSet::new();
        let mut task_names = HashMap::new();

        for participant in roster.registry_order() {
            let gateway = Arc::clone(&self.gateway);
            let cancel = cancel.clone();
            let name = participant.name.clone();
            let model = participant.model.clone();
            let system_prompt = PromptTemplate::participant_system(participant, meeting_title);
            let prompt = PromptTemplate::relevance_check(&participant.name, transcript);
            let max_tokens = self.max_tokens;

            let handle = join_set.spawn(async move {
                let request = InvocationRequest {
                    kind: InvocationKind::RelevanceCheck,
                    model: &model,
                    system_prompt: &system_prompt,
                    prompt: &prompt,
                    max_tokens,
                    timeout: relevance_timeout,
                };
                let invocation = invoke_bounded(gateway.as_ref(), request, &cancel).await;
                (name, invocation)
            });
            task_names.insert(handle.id(), participant.name.clone());
        }

        let mut votes = RelevanceVotes::new();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    join_set.abort_all();
                    while join_set.join_next().await.is_some() {}
                    info!("Relevance poll cancelled with {} of {} votes", votes.len(), roster.len());
                    return PollOutcome::Cancelled(votes);
                }
                next = join_set.join_next_with_id() => next,
            };

            let Some(result) = next else {
                break;
            };

            let (name, vote) = match result {
                Ok((_, (name, invocation))) => {
                    let vote = match invocation {
                        Invocation::Completed(reply) => parse_relevance_reply(&reply),
                        Invocation::TimedOut => RelevanceVote::TimedOut,
                        Invocation::Failed(e) => {
                            warn!("Relevance check for {} failed: {}", name, e);
                            RelevanceVote::Declines {
                                reason: format!("(error: {})", e),
                            }
                        }
                        // The select above observes the token first.
                        Invocation::Cancelled => continue,
                    };
                    (name, vote)
                }
                Err(e) => {
                    warn!("Relevance task join error: {}", e);
                    let Some(name) = task_names.get(&e.id()).cloned() else {
                        continue;
                    };
                    let vote = RelevanceVote::Declines {
                        reason: format!("(error: {})", e),
                    };
                    (name, vote)
                }
            };

            debug!("{} votes {}", name, vote.tag());
            if let Some(participant) = roster.get(&name) {
                progress.on_vote(participant, &vote);
            }
            votes.record(name, vote);
        }

        info!(
            "Relevance poll complete: {} of {} want to speak",
            votes.speaker_count(),
            votes.len()
        );
        PollOutcome::Completed(votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::test_support::{Script, ScriptedGateway, roster};
    use roundtable_domain::Participant;
    use std::sync::Mutex;
    use tokio::time::Instant;

    const RELEVANCE: Duration = Duration::from_secs(20);

    fn poller(gateway: ScriptedGateway) -> (RelevancePoller<ScriptedGateway>, ScriptedGateway) {
        let shared = gateway.clone();
        (RelevancePoller::new(Arc::new(gateway)), shared)
    }

    #[derive(Default)]
    struct RecordingProgress {
        votes: Mutex<Vec<(String, &'static str)>>,
    }

    impl MeetingProgressNotifier for RecordingProgress {
        fn on_vote(&self, participant: &Participant, vote: &RelevanceVote) {
            self.votes
                .lock()
                .unwrap()
                .push((participant.name.clone(), vote.tag()));
        }
    }

    // ==================== Vote Collection ====================

    #[tokio::test(start_paused = true)]
    async fn test_collects_one_vote_per_participant() {
        let (poller, _) = poller(
            ScriptedGateway::new()
                .relevance("alice", Script::yes())
                .relevance("bob", Script::no())
                .relevance("carol", Script::reply("decision: yes\nsummary: numbers")),
        );
        let roster = roster(&[("alice", 1), ("bob", 2), ("carol", 3)]);
        let progress = RecordingProgress::default();

        let outcome = poller
            .poll("T", "transcript", &roster, RELEVANCE, &CancellationToken::new(), &progress)
            .await;

        assert!(!outcome.is_cancelled());
        let votes = outcome.votes();
        assert_eq!(votes.len(), 3);
        assert!(votes.get("alice").unwrap().wants_to_speak());
        assert!(!votes.get("bob").unwrap().wants_to_speak());
        assert_eq!(
            votes.get("carol"),
            Some(&RelevanceVote::WantsToSpeak {
                summary: "numbers".to_string()
            })
        );
        assert_eq!(progress.votes.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_tokens_is_forwarded() {
        let gateway = ScriptedGateway::new()
            .relevance("alice", Script::yes())
            .relevance("bob", Script::yes());
        let shared = gateway.clone();
        let poller = RelevancePoller::new(Arc::new(gateway)).with_max_tokens(Some(150));
        let roster = roster(&[("alice", 1), ("bob", 2)]);

        poller
            .poll("T", "t", &roster, RELEVANCE, &CancellationToken::new(), &NoProgress)
            .await;

        assert!(shared.calls().iter().all(|c| c.max_tokens == Some(150)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_recorded_as_decline() {
        let (poller, _) = poller(
            ScriptedGateway::new()
                .relevance("alice", Script::yes())
                .relevance("bob", Script::Fail(GatewayError::ConnectionError("refused".into()))),
        );
        let roster = roster(&[("alice", 1), ("bob", 2)]);

        let outcome = poller
            .poll("T", "t", &roster, RELEVANCE, &CancellationToken::new(), &NoProgress)
            .await;

        match outcome.votes().get("bob") {
            Some(RelevanceVote::Declines { reason }) => assert!(reason.starts_with("(error:")),
            other => panic!("unexpected vote: {:?}", other),
        }
    }

    // ==================== Timeouts and Concurrency ====================

    #[tokio::test(start_paused = true)]
    async fn test_silent_participant_times_out_within_bound() {
        let (poller, gateway) = poller(
            ScriptedGateway::new()
                .relevance("alice", Script::yes())
                .relevance("bob", Script::Hang),
        );
        let roster = roster(&[("alice", 1), ("bob", 2)]);
        let start = Instant::now();

        let outcome = poller
            .poll("T", "t", &roster, RELEVANCE, &CancellationToken::new(), &NoProgress)
            .await;

        assert_eq!(outcome.votes().get("bob"), Some(&RelevanceVote::TimedOut));
        assert!(start.elapsed() <= RELEVANCE + Duration::from_secs(1));
        assert_eq!(gateway.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_participants_are_polled_concurrently() {
        let slow = || Script::Delay(Duration::from_secs(10), "DECISION: NO".to_string());
        let (poller, _) = poller(
            ScriptedGateway::new()
                .relevance("alice", slow())
                .relevance("bob", slow())
                .relevance("carol", slow()),
        );
        let roster = roster(&[("alice", 1), ("bob", 2), ("carol", 3)]);
        let start = Instant::now();

        poller
            .poll("T", "t", &roster, RELEVANCE, &CancellationToken::new(), &NoProgress)
            .await;

        assert!(start.elapsed() < Duration::from_secs(15));
    }

    // ==================== Cancellation ====================

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_poll_and_aborts_invocations() {
        let (poller, gateway) = poller(
            ScriptedGateway::new()
                .relevance("alice", Script::no())
                .relevance("bob", Script::Hang),
        );
        let roster = roster(&[("alice", 1), ("bob", 2)]);
        let cancel = CancellationToken::new();

        let canceller = {
            let cancel = cancel.clone();
            let started = gateway.hang_started();
            tokio::spawn(async move {
                started.notified().await;
                cancel.cancel();
            })
        };

        let outcome = poller
            .poll("T", "t", &roster, RELEVANCE, &cancel, &NoProgress)
            .await;
        canceller.await.unwrap();

        assert!(outcome.is_cancelled());
        assert!(outcome.votes().get("bob").is_none());
        assert_eq!(gateway.in_flight(), 0);
    }
}
