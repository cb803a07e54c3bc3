//! Prompt templates for the meeting flow

pub mod template;

pub use template::PromptTemplate;
