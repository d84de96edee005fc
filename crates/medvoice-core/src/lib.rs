//! medvoice-core: Medical Voice Assistant Core Library
//!
//! Configuration, the OpenAI chat-completion client, medical prompt builders,
//! and the file store for uploads, keyword records, and synthesized speech.

pub mod config;
pub mod error;
pub mod llm;
pub mod storage;

pub use config::{ApiConfig, Config, OpenAiConfig, StorageConfig};
pub use error::{Error, Result};
pub use llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionClient};
pub use storage::{FileStore, capture_timestamp};
