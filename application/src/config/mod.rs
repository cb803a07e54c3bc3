//! Application-level configuration.
//!
//! - [`SessionParams`] — session settings outside the persisted meeting
//!   configuration (notes model, summary bound, reply length caps)

pub mod session_params;

pub use session_params::SessionParams;
