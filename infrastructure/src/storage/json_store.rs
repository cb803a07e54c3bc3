//! JSON file transcript store
//!
//! Layout: `<dir>/<meeting_id>.json`, one pretty-printed document per
//! meeting. Every write replaces the whole document through a temporary
//! file in the same directory, so a reader sees either the previous or the
//! new document and never a partial round.

use chrono::{DateTime, Utc};
use roundtable_application::ports::transcript_store::{
    MeetingListing, StoreError, TranscriptStore,
};
use roundtable_domain::{Meeting, MeetingId, Round};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// On-disk document: the meeting plus bookkeeping timestamps.
#[derive(Debug, Serialize, Deserialize)]
struct StoredMeeting {
    #[serde(flatten)]
    meeting: Meeting,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub struct JsonTranscriptStore {
    dir: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

fn io_error(context: &str, path: &Path, e: impl std::fmt::Display) -> StoreError {
    StoreError::Io(format!("{} {}: {}", context, path.display(), e))
}

impl JsonTranscriptStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| io_error("cannot create", &dir, e))?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a document for `id` exists.
    pub fn contains(&self, id: &MeetingId) -> bool {
        self.path_for(id).map(|p| p.exists()).unwrap_or(false)
    }

    fn path_for(&self, id: &MeetingId) -> Result<PathBuf, StoreError> {
        let raw = id.as_str();
        if raw.is_empty() || raw.starts_with('.') || raw.contains(['/', '\\']) {
            return Err(StoreError::Io(format!("invalid meeting id '{}'", raw)));
        }
        Ok(self.dir.join(format!("{}.json", raw)))
    }

    fn read_document(&self, id: &MeetingId) -> Result<StoredMeeting, StoreError> {
        let path = self.path_for(id)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.clone()));
            }
            Err(e) => return Err(io_error("cannot read", &path, e)),
        };

        let document: StoredMeeting =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                meeting: id.clone(),
                reason: e.to_string(),
            })?;

        if document.meeting.id() != id {
            return Err(StoreError::Corrupt {
                meeting: id.clone(),
                reason: format!("document holds meeting '{}'", document.meeting.id()),
            });
        }
        document
            .meeting
            .validate()
            .map_err(|e| StoreError::corrupt(id, &e))?;
        Ok(document)
    }

    /// Write `document` atomically. With `create_new`, fails if the target
    /// already exists.
    fn write_document(&self, document: &StoredMeeting, create_new: bool) -> Result<(), StoreError> {
        let id = document.meeting.id();
        let path = self.path_for(id)?;

        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| io_error("cannot write", &self.dir, e))?;
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Io(format!("cannot serialize meeting {}: {}", id, e)))?;
        tmp.write_all(&json)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| io_error("cannot write", tmp.path(), e))?;

        if create_new {
            tmp.persist_noclobber(&path).map_err(|e| {
                if e.error.kind() == ErrorKind::AlreadyExists {
                    StoreError::AlreadyExists(id.clone())
                } else {
                    io_error("cannot persist", &path, e.error)
                }
            })?;
        } else {
            tmp.persist(&path)
                .map_err(|e| io_error("cannot persist", &path, e.error))?;
        }

        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TranscriptStore for JsonTranscriptStore {
    fn create(&self, meeting: &Meeting) -> Result<(), StoreError> {
        let _guard = self.lock();
        let now = Utc::now();
        let document = StoredMeeting {
            meeting: meeting.clone(),
            created_at: now,
            updated_at: now,
        };
        self.write_document(&document, true)
    }

    fn append_closed_round(&self, meeting_id: &MeetingId, round: &Round) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut document = self.read_document(meeting_id)?;

        let expected = document.meeting.next_round_index();
        if round.index != expected {
            warn!(
                "Rejecting round {} for {}: store expects round {}",
                round.index, meeting_id, expected
            );
            return Err(StoreError::Conflict {
                meeting: meeting_id.clone(),
                expected,
                found: round.index,
            });
        }

        document
            .meeting
            .push_round(round.clone())
            .map_err(|e| StoreError::corrupt(meeting_id, &e))?;
        document.updated_at = Utc::now();
        self.write_document(&document, false)
    }

    fn load(&self, meeting_id: &MeetingId) -> Result<Meeting, StoreError> {
        self.read_document(meeting_id).map(|d| d.meeting)
    }

    fn list(&self) -> Result<Vec<MeetingListing>, StoreError> {
        let entries =
            std::fs::read_dir(&self.dir).map_err(|e| io_error("cannot list", &self.dir, e))?;

        let mut documents = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.read_document(&MeetingId::new(stem)) {
                Ok(document) => documents.push(document),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        documents.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.meeting.id().cmp(a.meeting.id()))
        });

        Ok(documents
            .into_iter()
            .map(|d| MeetingListing {
                id: d.meeting.id().clone(),
                title: d.meeting.title().to_string(),
                created_at: d.created_at.to_rfc3339(),
                updated_at: d.updated_at.to_rfc3339(),
                round_count: d.meeting.rounds().len(),
                turn_count: d.meeting.turn_count(),
            })
            .collect())
    }

    fn delete(&self, meeting_id: &MeetingId) -> Result<bool, StoreError> {
        let _guard = self.lock();
        let path = self.path_for(meeting_id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("cannot delete", &path, e)),
        }
    }
}
