//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Invalid meeting configuration: {0}")]
    InvalidConfig(String),

    #[error("Round {found} cannot be appended; the next round index is {expected}")]
    NonContiguousRound { expected: u32, found: u32 },

    #[error("Invalid transcript: {0}")]
    InvalidTranscript(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }

    /// Configuration errors are fatal at setup time, before any round runs.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidRoster(_) | DomainError::InvalidConfig(_)
        )
    }
}
