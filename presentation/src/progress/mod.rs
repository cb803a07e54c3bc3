//! Progress reporting for meeting rounds

pub mod reporter;
