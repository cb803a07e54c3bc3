//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Also write diagnostic logs to a daily rolling file
    pub file: bool,
    /// Record meeting events as JSONL
    pub conversation_log: bool,
    /// Directory for both log kinds (default: `<data_dir>/roundtable/logs`)
    pub dir: Option<String>,
}

impl FileLoggingConfig {
    pub fn log_dir(&self) -> Option<PathBuf> {
        match &self.dir {
            Some(dir) => Some(super::expand_home(dir)),
            None => dirs::data_dir().map(|d| d.join("roundtable").join("logs")),
        }
    }
}
