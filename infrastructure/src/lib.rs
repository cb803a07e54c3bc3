//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLoggingConfig, FileMeetingConfig, FileNotesConfig,
    FileOutputConfig, FileParticipant, FileProviderConfig, FileReplConfig, FileStorageConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::openai::{OpenAiGateway, ProviderError};
pub use storage::{JsonTranscriptStore, generate_meeting_id};
