//! Participant registry for a single meeting.

use super::entities::Participant;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Smallest roster that makes a discussion.
pub const MIN_PARTICIPANTS: usize = 2;
/// Largest roster a meeting accepts.
pub const MAX_PARTICIPANTS: usize = 6;

/// The fixed, validated roster of a meeting.
///
/// Keeps participants in registry (insertion) order and precomputes the
/// priority order used for speaking. Deserialization goes through
/// [`ParticipantRoster::new`], so a roster loaded from disk is validated the
/// same way as one built at setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Participant>", into = "Vec<Participant>")]
pub struct ParticipantRoster {
    participants: Vec<Participant>,
    priority_order: Vec<usize>,
}

impl ParticipantRoster {
    /// Build a roster, rejecting empty or out-of-range sizes, blank names and
    /// duplicate names (case-insensitive).
    pub fn new(participants: Vec<Participant>) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::InvalidRoster(
                "at least one participant is required".to_string(),
            ));
        }
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&participants.len()) {
            return Err(DomainError::InvalidRoster(format!(
                "a meeting needs {}-{} participants, got {}",
                MIN_PARTICIPANTS,
                MAX_PARTICIPANTS,
                participants.len()
            )));
        }

        let mut seen = HashSet::new();
        for participant in &participants {
            let name = participant.name.trim();
            if name.is_empty() {
                return Err(DomainError::InvalidRoster(
                    "participant names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(DomainError::InvalidRoster(format!(
                    "duplicate participant name '{}'",
                    name
                )));
            }
        }

        // Vec::sort_by_key is stable, so equal priorities keep registry order
        let mut priority_order: Vec<usize> = (0..participants.len()).collect();
        priority_order.sort_by_key(|&i| participants[i].priority);

        Ok(Self {
            participants,
            priority_order,
        })
    }

    /// Participants in speaking-priority order (stable on ties).
    pub fn list(&self) -> Vec<&Participant> {
        self.priority_order
            .iter()
            .map(|&i| &self.participants[i])
            .collect()
    }

    /// Participants in the order they were registered.
    pub fn registry_order(&self) -> &[Participant] {
        &self.participants
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl TryFrom<Vec<Participant>> for ParticipantRoster {
    type Error = DomainError;

    fn try_from(participants: Vec<Participant>) -> Result<Self, Self::Error> {
        Self::new(participants)
    }
}

impl From<ParticipantRoster> for Vec<Participant> {
    fn from(roster: ParticipantRoster) -> Self {
        roster.participants
    }
}
