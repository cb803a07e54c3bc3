//! Progress notification port
//!
//! Defines the interface for reporting what a meeting round is doing while
//! it runs. Every method has a no-op default so implementations only handle
//! the events they display.

use crate::use_cases::run_round::SkipReason;
use roundtable_domain::{MeetingPhase, Participant, RelevanceVote, Round, Summary, Turn};

/// Callback for progress updates during a meeting round
///
/// Implementations live in the presentation layer. All calls come from the
/// task driving the round, never from the relevance fan-out tasks.
pub trait MeetingProgressNotifier: Send + Sync {
    /// Called whenever the session changes phase
    fn on_phase(&self, _phase: MeetingPhase) {}

    /// Called when a round opens
    fn on_round_start(&self, _index: u32, _participant_count: usize) {}

    /// Called as each relevance vote arrives
    fn on_vote(&self, _participant: &Participant, _vote: &RelevanceVote) {}

    /// Called once the speaking order is fixed
    fn on_speaking_order(&self, _order: &[&Participant]) {}

    /// Called before a participant is invoked for its response
    fn on_turn_start(&self, _participant: &Participant) {}

    /// Called when a turn has been appended to the round
    fn on_turn_complete(&self, _turn: &Turn) {}

    /// Called when a participant is skipped for the round
    fn on_turn_skipped(&self, _participant: &Participant, _reason: &SkipReason) {}

    /// Called when the round summary is ready
    fn on_summary(&self, _index: u32, _summary: &Summary) {}

    /// Called once the round is durably persisted
    fn on_round_closed(&self, _round: &Round) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl MeetingProgressNotifier for NoProgress {}
