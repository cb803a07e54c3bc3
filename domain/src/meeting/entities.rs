//! Meeting aggregate

use super::config::MeetingConfig;
use super::round::{OpenRound, Round, Summary};
use crate::core::error::DomainError;
use crate::participant::roster::ParticipantRoster;
use serde::{Deserialize, Serialize};

/// Identifier of a persisted meeting (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingId(String);

impl MeetingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MeetingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MeetingId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(MeetingId::new(s))
    }
}

/// A meeting (Aggregate Root)
///
/// Owns the roster, the configuration and the closed rounds. Rounds can only
/// be added through [`Meeting::push_round`], which enforces that indices stay
/// contiguous from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    id: MeetingId,
    title: String,
    config: MeetingConfig,
    roster: ParticipantRoster,
    #[serde(default)]
    rounds: Vec<Round>,
}

impl Meeting {
    pub fn new(
        id: MeetingId,
        title: impl Into<String>,
        config: MeetingConfig,
        roster: ParticipantRoster,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            id,
            title: title.into(),
            config,
            roster,
            rounds: Vec::new(),
        })
    }

    pub fn id(&self) -> &MeetingId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &MeetingConfig {
        &self.config
    }

    pub fn roster(&self) -> &ParticipantRoster {
        &self.roster
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// Index the next round will get: last closed index + 1, or 1.
    pub fn next_round_index(&self) -> u32 {
        self.rounds.last().map_or(1, |r| r.index + 1)
    }

    /// Open a fresh round at the next index.
    pub fn open_round(&self, human_message: impl Into<String>) -> OpenRound {
        OpenRound::new(self.next_round_index(), human_message)
    }

    /// Append a closed round. Rejects any index other than
    /// [`next_round_index`](Self::next_round_index).
    pub fn push_round(&mut self, round: Round) -> Result<(), DomainError> {
        let expected = self.next_round_index();
        if round.index != expected {
            return Err(DomainError::NonContiguousRound {
                expected,
                found: round.index,
            });
        }
        round.validate()?;
        self.rounds.push(round);
        Ok(())
    }

    /// Summaries of all rounds that have one, with their round index.
    pub fn summaries(&self) -> impl Iterator<Item = (u32, &Summary)> {
        self.rounds
            .iter()
            .filter_map(|r| r.summary.as_ref().map(|s| (r.index, s)))
    }

    pub fn turn_count(&self) -> usize {
        self.rounds.iter().map(|r| r.turns.len()).sum()
    }

    /// Validate the whole aggregate, e.g. after loading it from storage.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.config.validate()?;
        for (i, round) in self.rounds.iter().enumerate() {
            let expected = i as u32 + 1;
            if round.index != expected {
                return Err(DomainError::NonContiguousRound {
                    expected,
                    found: round.index,
                });
            }
            round.validate()?;
            if let Some(turn) = round
                .turns
                .iter()
                .find(|t| self.roster.get(&t.participant).is_none())
            {
                return Err(DomainError::InvalidTranscript(format!(
                    "round {}: unknown participant '{}'",
                    round.index, turn.participant
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;
    use crate::meeting::round::RoundOutcome;
    use crate::participant::entities::Participant;

    fn meeting() -> Meeting {
        let roster = ParticipantRoster::new(vec![
            Participant::new("A", "r", "p", Model::new("m"), 1),
            Participant::new("B", "r", "p", Model::new("m"), 2),
        ])
        .unwrap();
        Meeting::new(
            MeetingId::new("meeting_1"),
            "Test",
            MeetingConfig::default(),
            roster,
        )
        .unwrap()
    }

    #[test]
    fn test_next_round_index_starts_at_one() {
        assert_eq!(meeting().next_round_index(), 1);
    }

    #[test]
    fn test_push_round_advances_index() {
        let mut m = meeting();
        let mut open = m.open_round("first");
        open.push_turn("A", "hi");
        m.push_round(open.close(RoundOutcome::Completed, None)).unwrap();

        let open = m.open_round("second");
        assert_eq!(open.index(), 2);
        m.push_round(open.close(RoundOutcome::Interrupted, None)).unwrap();
        assert_eq!(m.next_round_index(), 3);
        assert_eq!(m.turn_count(), 1);
    }

    #[test]
    fn test_push_round_rejects_gap() {
        let mut m = meeting();
        let round = OpenRound::new(2, "skip").close(RoundOutcome::Completed, None);
        let err = m.push_round(round).unwrap_err();
        assert_eq!(
            err,
            DomainError::NonContiguousRound {
                expected: 1,
                found: 2
            }
        );
        assert!(m.rounds().is_empty());
    }

    #[test]
    fn test_summaries_skip_absent() {
        let mut m = meeting();
        m.push_round(
            m.open_round("one")
                .close(RoundOutcome::Completed, Some(Summary::new("- point"))),
        )
        .unwrap();
        m.push_round(m.open_round("two").close(RoundOutcome::Completed, None))
            .unwrap();

        let summaries: Vec<_> = m.summaries().collect();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].0, 1);
    }

    #[test]
    fn test_validate_rejects_unknown_speaker() {
        let mut m = meeting();
        let mut open = m.open_round("x");
        open.push_turn("Mallory", "hi");
        m.rounds.push(open.close(RoundOutcome::Completed, None));
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_next_index() {
        let mut m = meeting();
        m.push_round(m.open_round("one").close(RoundOutcome::Completed, None))
            .unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: Meeting = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
        assert_eq!(back.next_round_index(), 2);
    }
}
