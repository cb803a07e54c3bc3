//! Domain layer for roundtable
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Meeting
//!
//! A human moderator runs a discussion among AI participants. Each message
//! from the moderator opens a **round**:
//!
//! 1. **Relevance**: every participant says whether it wants to speak
//! 2. **Turns**: interested participants speak one after another, by priority
//! 3. **Notes**: the round is summarized
//!
//! Closed rounds are appended to the meeting with contiguous indices, so a
//! saved meeting always resumes at `last index + 1`.

pub mod config;
pub mod core;
pub mod meeting;
pub mod participant;
pub mod prompt;
pub mod relevance;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model};
pub use meeting::{
    config::MeetingConfig,
    entities::{Meeting, MeetingId},
    phase::MeetingPhase,
    round::{OpenRound, Round, RoundOutcome, Summary, Turn},
    transcript::{MODERATOR, render_round, render_transcript},
};
pub use participant::{
    entities::Participant,
    roster::{MAX_PARTICIPANTS, MIN_PARTICIPANTS, ParticipantRoster},
};
pub use prompt::PromptTemplate;
pub use relevance::{RelevanceVote, RelevanceVotes, parse_relevance_reply};
