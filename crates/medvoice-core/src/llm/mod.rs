//! OpenAI chat completion client, types, and prompt builders

mod client;
pub mod prompts;
mod types;

pub use client::CompletionClient;
pub use types::*;
