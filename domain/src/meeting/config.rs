//! Per-meeting scheduling configuration

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scheduling limits for one meeting.
///
/// Passed explicitly into the session and scheduler and persisted with the
/// meeting, so a resumed meeting runs under the limits it was created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingConfig {
    /// Ceiling on the number of turns produced in one round.
    pub max_turns_per_round: usize,
    /// Bound on each participant's relevance answer.
    #[serde(with = "duration_secs")]
    pub relevance_timeout: Duration,
    /// Bound on each participant's full response.
    #[serde(with = "duration_secs")]
    pub response_timeout: Duration,
}

/// Durations stored as (possibly fractional) seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if value.subsec_nanos() == 0 {
            serializer.serialize_u64(value.as_secs())
        } else {
            serializer.serialize_f64(value.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            max_turns_per_round: 10,
            relevance_timeout: Duration::from_secs(20),
            response_timeout: Duration::from_secs(90),
        }
    }
}

impl MeetingConfig {
    pub fn new(
        max_turns_per_round: usize,
        relevance_timeout: Duration,
        response_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let config = Self {
            max_turns_per_round,
            relevance_timeout,
            response_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Structural checks only; human-facing bounds (seconds ranges) are
    /// enforced where the configuration file is parsed.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_turns_per_round == 0 {
            return Err(DomainError::InvalidConfig(
                "max_turns_per_round must be at least 1".to_string(),
            ));
        }
        if self.relevance_timeout.is_zero() {
            return Err(DomainError::InvalidConfig(
                "relevance timeout must be greater than zero".to_string(),
            ));
        }
        if self.response_timeout.is_zero() {
            return Err(DomainError::InvalidConfig(
                "response timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    // ==================== Builder Methods ====================

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns_per_round = max;
        self
    }

    pub fn with_relevance_timeout(mut self, timeout: Duration) -> Self {
        self.relevance_timeout = timeout;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }
}
