//! Use cases
//!
//! Application-level operations that orchestrate domain logic.
//!
//! - [`meeting_session`] drives a meeting round by round
//! - [`poll_relevance`] asks every participant whether it wants to speak
//! - [`run_round`] invokes the speakers in priority order
//! - [`summarize_round`] writes the notes for a closed round

pub mod meeting_session;
pub mod poll_relevance;
pub mod run_round;
pub mod shared;
pub mod summarize_round;

#[cfg(test)]
pub(crate) mod test_support;
