//! Participant entries from TOML (`[[participants]]` array)

use roundtable_domain::{ConfigIssue, ConfigIssueCode, Model, Participant};
use serde::{Deserialize, Serialize};

/// One `[[participants]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileParticipant {
    pub name: String,
    pub role: String,
    pub personality: String,
    #[serde(default)]
    pub description: String,
    pub model: Model,
    /// Speaking order, 1 speaks first
    pub priority: u32,
}

impl FileParticipant {
    pub fn validate(&self, index: usize) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("name", self.name.as_str()),
            ("role", self.role.as_str()),
            ("model", self.model.as_str()),
        ] {
            if value.trim().is_empty() {
                let field = format!("participants[{}].{}", index, field);
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: field.clone(),
                    },
                    format!("{} cannot be empty", field),
                ));
            }
        }
        if self.priority == 0 {
            let field = format!("participants[{}].priority", index);
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: field.clone(),
                    value: 0,
                    min: 1,
                    max: u32::MAX as u64,
                },
                format!("{} must be at least 1", field),
            ));
        }
        issues
    }

    pub fn to_participant(&self) -> Participant {
        Participant::new(
            self.name.trim(),
            self.role.trim(),
            self.personality.trim(),
            self.model.clone(),
            self.priority,
        )
        .with_description(self.description.trim())
    }
}
