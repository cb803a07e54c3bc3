//! Output formatting for meetings

pub mod console;
