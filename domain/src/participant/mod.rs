//! Participant domain.
//!
//! - [`entities::Participant`]: one AI participant with role, personality and model
//! - [`roster::ParticipantRoster`]: the fixed, validated roster of a meeting

pub mod entities;
pub mod roster;
