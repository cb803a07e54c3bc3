//! Meeting domain.
//!
//! - [`entities::Meeting`]: the aggregate owning roster, configuration and closed rounds
//! - [`round::OpenRound`] / [`round::Round`]: a round while produced and once closed
//! - [`config::MeetingConfig`]: per-meeting scheduling limits
//! - [`phase::MeetingPhase`]: states of the meeting session
//! - [`transcript`]: rendering the transcript-so-far for prompts

pub mod config;
pub mod entities;
pub mod phase;
pub mod round;
pub mod transcript;
