//! Relevance vote types

use crate::participant::entities::Participant;
use crate::participant::roster::ParticipantRoster;
use std::collections::HashMap;

/// A participant's decision for the current round.
///
/// Transient: used to build the speaking order and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelevanceVote {
    /// Wants to speak; `summary` is a one-line preview of the point.
    WantsToSpeak { summary: String },
    /// Passes this round; `reason` explains why (or carries a failure).
    Declines { reason: String },
    /// Did not answer within the relevance timeout.
    TimedOut,
}

impl RelevanceVote {
    pub fn wants_to_speak(&self) -> bool {
        matches!(self, RelevanceVote::WantsToSpeak { .. })
    }

    /// Short tag for notes, e.g. "YES"
    pub fn tag(&self) -> &'static str {
        match self {
            RelevanceVote::WantsToSpeak { .. } => "YES",
            RelevanceVote::Declines { .. } => "NO",
            RelevanceVote::TimedOut => "TIMEOUT",
        }
    }

    /// The one-line explanation attached to the vote.
    pub fn note(&self) -> &str {
        match self {
            RelevanceVote::WantsToSpeak { summary } => summary,
            RelevanceVote::Declines { reason } => reason,
            RelevanceVote::TimedOut => "(timed out on relevance check)",
        }
    }
}

/// All relevance votes of one round, keyed by participant name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevanceVotes {
    votes: HashMap<String, RelevanceVote>,
}

impl RelevanceVotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, participant: impl Into<String>, vote: RelevanceVote) {
        self.votes.insert(participant.into(), vote);
    }

    pub fn get(&self, participant: &str) -> Option<&RelevanceVote> {
        self.votes.get(participant)
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelevanceVote)> {
        self.votes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn speaker_count(&self) -> usize {
        self.votes.values().filter(|v| v.wants_to_speak()).count()
    }

    /// Participants who want to speak, ascending by priority with ties in
    /// registry order. Participants without a vote do not speak.
    pub fn speaking_order<'a>(&self, roster: &'a ParticipantRoster) -> Vec<&'a Participant> {
        roster
            .list()
            .into_iter()
            .filter(|p| self.get(&p.name).is_some_and(RelevanceVote::wants_to_speak))
            .collect()
    }
}

impl FromIterator<(String, RelevanceVote)> for RelevanceVotes {
    fn from_iter<I: IntoIterator<Item = (String, RelevanceVote)>>(iter: I) -> Self {
        Self {
            votes: iter.into_iter().collect(),
        }
    }
}
