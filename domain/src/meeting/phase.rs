//! Meeting session phases

use serde::{Deserialize, Serialize};

/// State of a meeting session.
///
/// ```text
/// AwaitingInput -> Polling -> Scheduling -> Summarizing -> Persisted -> AwaitingInput
///                     |           |
///                     +-----------+--> Interrupted -> Persisted
/// ```
///
/// `PersistFailed` holds a closed round the store refused; `Quit` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingPhase {
    AwaitingInput,
    Polling,
    Scheduling,
    Summarizing,
    Interrupted,
    Persisted,
    PersistFailed,
    Quit,
}

impl MeetingPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingPhase::AwaitingInput => "awaiting_input",
            MeetingPhase::Polling => "polling",
            MeetingPhase::Scheduling => "scheduling",
            MeetingPhase::Summarizing => "summarizing",
            MeetingPhase::Interrupted => "interrupted",
            MeetingPhase::Persisted => "persisted",
            MeetingPhase::PersistFailed => "persist_failed",
            MeetingPhase::Quit => "quit",
        }
    }

    /// Whether a round is currently being produced.
    pub fn is_round_active(&self) -> bool {
        matches!(
            self,
            MeetingPhase::Polling | MeetingPhase::Scheduling | MeetingPhase::Summarizing
        )
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: MeetingPhase) -> bool {
        use MeetingPhase::*;
        if next == Quit {
            return *self != Quit;
        }
        matches!(
            (*self, next),
            (AwaitingInput, Polling)
                | (Polling, Scheduling)
                | (Polling, Interrupted)
                | (Scheduling, Summarizing)
                | (Scheduling, Interrupted)
                | (Scheduling, Persisted)
                | (Summarizing, Persisted)
                | (Interrupted, Persisted)
                | (Summarizing, PersistFailed)
                | (Scheduling, PersistFailed)
                | (Interrupted, PersistFailed)
                | (PersistFailed, Persisted)
                | (PersistFailed, PersistFailed)
                | (PersistFailed, AwaitingInput)
                | (Persisted, AwaitingInput)
        )
    }
}

impl std::fmt::Display for MeetingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
