//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — reference to the model backing a participant
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
