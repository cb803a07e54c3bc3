//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for transcripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable transcript with notes (default)
    #[default]
    Text,
    /// The persisted meeting document as JSON
    Json,
}
