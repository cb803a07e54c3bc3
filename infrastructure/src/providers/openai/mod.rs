//! OpenAI-compatible chat completions provider

mod gateway;
mod session;
mod types;

pub use gateway::{OpenAiGateway, ProviderError};
pub use session::OpenAiSession;
