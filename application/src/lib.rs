//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{MeetingProgressNotifier, NoProgress},
    transcript_store::{MeetingListing, StoreError, TranscriptStore},
};
pub use use_cases::meeting_session::{
    MeetingSession, RoundReport, SessionControl, SessionError, SessionWarning,
};
pub use use_cases::poll_relevance::{PollOutcome, RelevancePoller};
pub use use_cases::run_round::{ScheduledRound, SkipReason, SkippedTurn, TurnScheduler};
pub use use_cases::shared::{Invocation, InvocationKind};
pub use use_cases::summarize_round::{SummaryError, Summarizer};
