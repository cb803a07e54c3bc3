//! Presentation-level configuration
//!
//! Settings for the meeting REPL, resolved by the binary from the file
//! configuration and CLI flags.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show spinners while participants think
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: dirs::data_dir().map(|d| d.join("roundtable").join("history.txt")),
        }
    }
}
