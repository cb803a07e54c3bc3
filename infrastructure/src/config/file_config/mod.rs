//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod meeting;
mod notes;
mod output;
mod participants;
mod provider;
mod repl;
mod storage;

pub use logging::FileLoggingConfig;
pub use meeting::FileMeetingConfig;
pub use notes::FileNotesConfig;
pub use output::FileOutputConfig;
pub use participants::FileParticipant;
pub use provider::FileProviderConfig;
pub use repl::FileReplConfig;
pub use storage::FileStorageConfig;

use roundtable_application::SessionParams;
use roundtable_domain::{
    ConfigIssue, ConfigIssueCode, DomainError, MeetingConfig, ParticipantRoster,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Meeting limits and title
    pub meeting: FileMeetingConfig,
    /// Round summarizer settings
    pub notes: FileNotesConfig,
    /// Model endpoint settings
    pub provider: FileProviderConfig,
    /// Where meetings are saved
    pub storage: FileStorageConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// The meeting roster
    pub participants: Vec<FileParticipant>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks section values, each participant entry, and finally the
    /// roster as a whole.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.meeting.validate());
        issues.extend(self.notes.validate());

        for (i, participant) in self.participants.iter().enumerate() {
            issues.extend(participant.validate(i));
        }

        if let Err(e) = self.to_roster() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidRoster,
                format!("participants: {}", e),
            ));
        }

        issues.extend(self.api_key_issue());
        issues
    }

    /// Validate for resuming a saved meeting.
    ///
    /// The stored meeting carries its own roster and `[meeting]` limits, so
    /// only the sections a resumed session reads are checked.
    pub fn validate_for_resume(&self) -> Vec<ConfigIssue> {
        let mut issues = self.notes.validate();
        issues.extend(self.api_key_issue());
        issues
    }

    fn api_key_issue(&self) -> Option<ConfigIssue> {
        if self.provider.resolve_api_key().is_some() {
            return None;
        }
        Some(ConfigIssue::warning(
            ConfigIssueCode::EmptyValue {
                field: "provider.api_key".to_string(),
            },
            format!(
                "no API key: set {} or provider.api_key",
                self.provider.api_key_env
            ),
        ))
    }

    pub fn to_roster(&self) -> Result<ParticipantRoster, DomainError> {
        ParticipantRoster::new(
            self.participants
                .iter()
                .map(FileParticipant::to_participant)
                .collect(),
        )
    }

    pub fn to_meeting_config(&self) -> MeetingConfig {
        self.meeting.to_meeting_config()
    }

    /// Render the effective configuration as TOML, hiding the API key.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        if shown.provider.api_key.is_some() {
            shown.provider.api_key = Some("********".to_string());
        }
        toml::to_string_pretty(&shown)
    }

    pub fn to_session_params(&self) -> SessionParams {
        SessionParams {
            notes_model: self.notes.model.clone(),
            summary_timeout: Duration::from_secs(self.notes.timeout_seconds),
            relevance_max_tokens: Some(self.provider.relevance_max_tokens),
            summary_max_tokens: Some(self.provider.summary_max_tokens),
        }
    }
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
