//! Session parameters — settings the meeting session needs beyond the
//! persisted [`MeetingConfig`](roundtable_domain::MeetingConfig).

use roundtable_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for a meeting session.
///
/// Unlike the meeting's own configuration these are not persisted; a
/// resumed meeting picks up whatever the current configuration says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Model used for round summaries.
    pub notes_model: Model,
    /// Bound on the summary call.
    pub summary_timeout: Duration,
    /// Reply length cap for relevance checks.
    pub relevance_max_tokens: Option<u32>,
    /// Reply length cap for summaries.
    pub summary_max_tokens: Option<u32>,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            notes_model: Model::default(),
            summary_timeout: Duration::from_secs(30),
            relevance_max_tokens: Some(150),
            summary_max_tokens: Some(500),
        }
    }
}

impl SessionParams {
    // ==================== Builder Methods ====================

    pub fn with_notes_model(mut self, model: Model) -> Self {
        self.notes_model = model;
        self
    }

    pub fn with_summary_timeout(mut self, timeout: Duration) -> Self {
        self.summary_timeout = timeout;
        self
    }
}
