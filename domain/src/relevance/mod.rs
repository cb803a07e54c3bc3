//! Relevance polling primitives.
//!
//! Before each round every participant is asked whether it wants to speak.
//!
//! - [`vote::RelevanceVote`]: one participant's answer for one round
//! - [`vote::RelevanceVotes`]: all answers of a round, and the speaking order they imply
//! - [`parsing::parse_relevance_reply`]: reading the `DECISION:` / `SUMMARY:` reply format

pub mod parsing;
pub mod vote;

pub use parsing::parse_relevance_reply;
pub use vote::{RelevanceVote, RelevanceVotes};
