//! Rounds, turns and summaries

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One participant's completed contribution within a round (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Name of the participant who spoke
    pub participant: String,
    /// Produced text
    pub text: String,
    /// 0-based position within the round
    pub position: u32,
}

/// Summary text for a closed round (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary(String);

impl Summary {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Every candidate was heard, skipped, or the turn ceiling was reached.
    #[default]
    Completed,
    /// Cancelled mid-round; holds only the turns completed before the signal.
    Interrupted,
}

/// A round still being produced.
///
/// Only the turn scheduler appends to it, and only after a response has
/// fully completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRound {
    index: u32,
    human_message: String,
    turns: Vec<Turn>,
}

impl OpenRound {
    pub fn new(index: u32, human_message: impl Into<String>) -> Self {
        Self {
            index,
            human_message: human_message.into(),
            turns: Vec::new(),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn human_message(&self) -> &str {
        &self.human_message
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Append a completed turn at the next position.
    pub fn push_turn(&mut self, participant: impl Into<String>, text: impl Into<String>) -> &Turn {
        let position = self.turns.len() as u32;
        self.turns.push(Turn {
            participant: participant.into(),
            text: text.into(),
            position,
        });
        &self.turns[self.turns.len() - 1]
    }

    /// Close the round with its final turn set.
    pub fn close(self, outcome: RoundOutcome, summary: Option<Summary>) -> Round {
        Round {
            index: self.index,
            human_message: self.human_message,
            turns: self.turns,
            summary,
            outcome,
        }
    }
}

/// A closed round as persisted (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based, contiguous within a meeting
    pub index: u32,
    /// The moderator's message that opened the round
    pub human_message: String,
    /// Turns in production order
    pub turns: Vec<Turn>,
    /// Zero or one summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub outcome: RoundOutcome,
}

impl Round {
    pub fn is_interrupted(&self) -> bool {
        self.outcome == RoundOutcome::Interrupted
    }

    /// Names of the participants who spoke, in order.
    pub fn speakers(&self) -> Vec<&str> {
        self.turns.iter().map(|t| t.participant.as_str()).collect()
    }

    /// Attach a summary produced after the round's turns were fixed.
    pub fn with_summary(mut self, summary: Option<Summary>) -> Self {
        self.summary = summary;
        self
    }

    /// Check per-round invariants: index starts at 1 and turn positions are
    /// unique and contiguous from 0.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.index == 0 {
            return Err(DomainError::InvalidTranscript(
                "round indices start at 1".to_string(),
            ));
        }
        for (expected, turn) in self.turns.iter().enumerate() {
            if turn.position != expected as u32 {
                return Err(DomainError::InvalidTranscript(format!(
                    "round {}: turn at slot {} has position {}",
                    self.index, expected, turn.position
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_turn_assigns_positions() {
        let mut round = OpenRound::new(1, "hello");
        round.push_turn("A", "first");
        let second = round.push_turn("B", "second");
        assert_eq!(second.position, 1);
        assert_eq!(round.turn_count(), 2);
    }

    #[test]
    fn test_close_keeps_turns_and_outcome() {
        let mut open = OpenRound::new(4, "topic");
        open.push_turn("A", "text");
        let round = open.close(RoundOutcome::Interrupted, None);

        assert_eq!(round.index, 4);
        assert!(round.is_interrupted());
        assert_eq!(round.speakers(), vec!["A"]);
        assert!(round.summary.is_none());
        assert!(round.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_gapped_positions() {
        let round = Round {
            index: 1,
            human_message: "m".to_string(),
            turns: vec![
                Turn {
                    participant: "A".to_string(),
                    text: "a".to_string(),
                    position: 0,
                },
                Turn {
                    participant: "B".to_string(),
                    text: "b".to_string(),
                    position: 2,
                },
            ],
            summary: None,
            outcome: RoundOutcome::Completed,
        };
        assert!(round.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_index() {
        let round = OpenRound::new(0, "m").close(RoundOutcome::Completed, None);
        assert!(round.validate().is_err());
    }

    #[test]
    fn test_outcome_defaults_when_missing() {
        let json = r#"{"index":1,"human_message":"hi","turns":[]}"#;
        let round: Round = serde_json::from_str(json).unwrap();
        assert_eq!(round.outcome, RoundOutcome::Completed);
        assert!(round.summary.is_none());
    }
}
