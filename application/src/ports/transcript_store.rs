//! Transcript store port
//!
//! Durable, append-only storage of meetings. A round is handed to the store
//! only once its final turn set is known, and the append must be atomic: a
//! reload after a crash sees the round either fully present or missing.

use roundtable_domain::{DomainError, Meeting, MeetingId, Round};
use serde::Serialize;
use thiserror::Error;

/// Errors from the transcript store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Meeting not found: {0}")]
    NotFound(MeetingId),

    #[error("Meeting already exists: {0}")]
    AlreadyExists(MeetingId),

    #[error("Conflicting write to meeting {meeting}: expected round {expected}, got round {found}")]
    Conflict {
        meeting: MeetingId,
        expected: u32,
        found: u32,
    },

    #[error("Meeting {meeting} is corrupt: {reason}")]
    Corrupt { meeting: MeetingId, reason: String },

    #[error("Storage I/O error: {0}")]
    Io(String),
}

impl StoreError {
    pub fn corrupt(meeting: &MeetingId, error: &DomainError) -> Self {
        StoreError::Corrupt {
            meeting: meeting.clone(),
            reason: error.to_string(),
        }
    }
}

/// Metadata for listing saved meetings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingListing {
    pub id: MeetingId,
    pub title: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
    pub round_count: usize,
    pub turn_count: usize,
}

/// Durable storage for meetings.
///
/// A single session writes a meeting at a time. Implementations detect a
/// second writer through the round index check in
/// [`append_closed_round`](TranscriptStore::append_closed_round) and return
/// [`StoreError::Conflict`] instead of overwriting.
pub trait TranscriptStore: Send + Sync {
    /// Persist a new meeting (normally with zero rounds).
    fn create(&self, meeting: &Meeting) -> Result<(), StoreError>;

    /// Atomically append one closed round. The round's index must be the
    /// persisted meeting's next round index.
    fn append_closed_round(&self, meeting_id: &MeetingId, round: &Round) -> Result<(), StoreError>;

    /// Load a meeting and validate its invariants.
    fn load(&self, meeting_id: &MeetingId) -> Result<Meeting, StoreError>;

    /// List saved meetings, newest first.
    fn list(&self) -> Result<Vec<MeetingListing>, StoreError>;

    /// Delete a meeting. Returns `false` if it did not exist.
    fn delete(&self, meeting_id: &MeetingId) -> Result<bool, StoreError>;
}
