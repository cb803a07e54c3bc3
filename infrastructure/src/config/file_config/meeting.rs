//! Meeting configuration from TOML (`[meeting]` section)

use roundtable_domain::{ConfigIssue, ConfigIssueCode, MeetingConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MAX_TURNS_RANGE: (u64, u64) = (1, 50);
pub const RELEVANCE_TIMEOUT_RANGE: (u64, u64) = (5, 120);
pub const RESPONSE_TIMEOUT_RANGE: (u64, u64) = (10, 300);

/// Raw meeting configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMeetingConfig {
    /// Title of new meetings
    pub title: String,
    /// Most turns a single round may produce
    pub max_turns_per_round: u64,
    /// Bound on each relevance check, in seconds
    pub relevance_timeout_seconds: u64,
    /// Bound on each full response, in seconds
    pub response_timeout_seconds: u64,
}

impl Default for FileMeetingConfig {
    fn default() -> Self {
        Self {
            title: "Untitled meeting".to_string(),
            max_turns_per_round: 10,
            relevance_timeout_seconds: 20,
            response_timeout_seconds: 90,
        }
    }
}

impl FileMeetingConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "meeting.title".to_string(),
                },
                "meeting.title cannot be empty",
            ));
        }

        for (field, value, (min, max)) in [
            ("meeting.max_turns_per_round", self.max_turns_per_round, MAX_TURNS_RANGE),
            (
                "meeting.relevance_timeout_seconds",
                self.relevance_timeout_seconds,
                RELEVANCE_TIMEOUT_RANGE,
            ),
            (
                "meeting.response_timeout_seconds",
                self.response_timeout_seconds,
                RESPONSE_TIMEOUT_RANGE,
            ),
        ] {
            if !(min..=max).contains(&value) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: field.to_string(),
                        value,
                        min,
                        max,
                    },
                    format!("{} must be between {} and {}, got {}", field, min, max, value),
                ));
            }
        }

        if self.response_timeout_seconds <= self.relevance_timeout_seconds {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ResponseNotAfterRelevance,
                format!(
                    "meeting.response_timeout_seconds ({}) must be greater than meeting.relevance_timeout_seconds ({})",
                    self.response_timeout_seconds, self.relevance_timeout_seconds
                ),
            ));
        }

        issues
    }

    pub fn to_meeting_config(&self) -> MeetingConfig {
        MeetingConfig::default()
            .with_max_turns(self.max_turns_per_round as usize)
            .with_relevance_timeout(Duration::from_secs(self.relevance_timeout_seconds))
            .with_response_timeout(Duration::from_secs(self.response_timeout_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileMeetingConfig::default();
        assert!(config.validate().is_empty());
        let meeting = config.to_meeting_config();
        assert_eq!(meeting.max_turns_per_round, 10);
        assert_eq!(meeting.relevance_timeout, Duration::from_secs(20));
        assert_eq!(meeting.response_timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_out_of_range_values_reported() {
        let config = FileMeetingConfig {
            max_turns_per_round: 0,
            relevance_timeout_seconds: 200,
            ..Default::default()
        };
        let issues = config.validate();
        assert!(issues.iter().all(|i| i.is_error()));
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::OutOfRange { field, .. } if field == "meeting.max_turns_per_round"
        )));
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::OutOfRange { field, .. } if field == "meeting.relevance_timeout_seconds"
        )));
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::ResponseNotAfterRelevance)
        );
    }

    #[test]
    fn test_response_must_exceed_relevance() {
        let config = FileMeetingConfig {
            relevance_timeout_seconds: 30,
            response_timeout_seconds: 30,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ResponseNotAfterRelevance);
    }
}
