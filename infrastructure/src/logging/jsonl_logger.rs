//! JSONL file writer for meeting events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying the event
//! payload plus `type`, `meeting` and `timestamp` fields. A meeting keeps a
//! single log across sessions: resuming appends to it.

use roundtable_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use roundtable_domain::MeetingId;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    meeting: MeetingId,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) `<dir>/<meeting_id>.conversation.jsonl`.
    ///
    /// Returns `None` when the file cannot be opened; the meeting then runs
    /// without a conversation log.
    pub fn for_meeting(dir: impl AsRef<Path>, meeting: &MeetingId) -> Option<Self> {
        let path = dir
            .as_ref()
            .join(format!("{}.conversation.jsonl", meeting));
        Self::open(path, meeting.clone())
    }

    fn open(path: PathBuf, meeting: MeetingId) -> Option<Self> {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            meeting,
            path,
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("meeting".to_string(), Value::from(self.meeting.as_str()));
        map.insert("timestamp".to_string(), Value::from(timestamp));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Conversation log write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let meeting = MeetingId::new("meeting_20250101_090000");
        let logger = JsonlConversationLogger::for_meeting(dir.path(), &meeting).unwrap();

        logger.log(ConversationEvent::new(
            "round_started",
            json!({ "round": 1, "message": "Kickoff" }),
        ));
        logger.log(ConversationEvent::new(
            "turn_completed",
            json!({ "round": 1, "participant": "Ada", "position": 0, "text": "Hi" }),
        ));

        let records = read_lines(logger.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "round_started");
        assert_eq!(records[0]["meeting"], "meeting_20250101_090000");
        assert_eq!(records[0]["message"], "Kickoff");
        assert!(records[0]["timestamp"].is_string());
        assert_eq!(records[1]["participant"], "Ada");
        assert!(
            logger
                .path()
                .ends_with("meeting_20250101_090000.conversation.jsonl")
        );
    }

    #[test]
    fn test_resumed_meeting_appends() {
        let dir = tempfile::tempdir().unwrap();
        let meeting = MeetingId::new("m");

        let first = JsonlConversationLogger::for_meeting(dir.path(), &meeting).unwrap();
        first.log(ConversationEvent::new("round_started", json!({ "round": 1 })));
        drop(first);

        let second = JsonlConversationLogger::for_meeting(dir.path(), &meeting).unwrap();
        second.log(ConversationEvent::new("round_started", json!({ "round": 2 })));

        let records = read_lines(second.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["round"], 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlConversationLogger::for_meeting(dir.path(), &MeetingId::new("m")).unwrap();

        logger.log(ConversationEvent::new("note", json!("just a string")));

        let records = read_lines(logger.path());
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "just a string");
    }

    #[test]
    fn test_unwritable_directory_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        assert!(JsonlConversationLogger::for_meeting(blocker.join("sub"), &MeetingId::new("m")).is_none());
    }
}
