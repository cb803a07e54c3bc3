//! Meeting storage
//!
//! [`JsonTranscriptStore`] implements the
//! [`TranscriptStore`](roundtable_application::TranscriptStore) port with one
//! pretty-printed JSON document per meeting.

mod json_store;
mod meeting_id;

pub use json_store::JsonTranscriptStore;
pub use meeting_id::generate_meeting_id;
