//! Error types for medvoice-core

use thiserror::Error;

/// Main error type for medvoice-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("OpenAI API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for medvoice-core
pub type Result<T> = std::result::Result<T, Error>;
