//! Model providers implementing the [`LlmGateway`](roundtable_application::LlmGateway) port.

pub mod openai;
