//! Notes configuration from TOML (`[notes]` section)

use roundtable_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Raw notes (summarizer) configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNotesConfig {
    /// Model that writes the round summaries
    pub model: Model,
    /// Bound on the summary call, in seconds
    pub timeout_seconds: u64,
}

impl Default for FileNotesConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            timeout_seconds: 30,
        }
    }
}

impl FileNotesConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.model.as_str().trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "notes.model".to_string(),
                },
                "notes.model cannot be empty",
            ));
        }
        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "notes.timeout_seconds".to_string(),
                    value: 0,
                    min: 1,
                    max: u64::MAX,
                },
                "notes.timeout_seconds cannot be 0",
            ));
        }
        issues
    }
}
