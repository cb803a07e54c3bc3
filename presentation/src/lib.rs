//! Presentation layer for roundtable
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive meeting interface.

pub mod cli;
pub mod config;
pub mod meeting;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, CliOutputFormat};
pub use config::ReplConfig;
pub use meeting::repl::{MeetingRepl, ReplCommand};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
