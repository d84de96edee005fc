//! Error types for medvoice-api
//!
//! Error display strings double as the client-facing `{"error": ...}` body,
//! so they keep the exact wording the frontend expects.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use medvoice_voice::VoiceError;

/// medvoice-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid OpenAI API key. Check your .env file.")]
    AuthFailed,

    #[error("{0}")]
    Transcription(String),

    #[error("OpenAI error: {0}")]
    Upstream(String),

    #[error("Error generating speech: {0}")]
    Synthesis(String),

    #[error("Server error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthFailed => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            // Full detail stays server-side; the client gets the generic message.
            tracing::error!("Unhandled server error: {}", detail);
        }

        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<medvoice_core::Error> for ApiError {
    fn from(err: medvoice_core::Error) -> Self {
        match err {
            medvoice_core::Error::AuthFailed(_) => ApiError::AuthFailed,
            medvoice_core::Error::Api(msg) => ApiError::Upstream(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<VoiceError> for ApiError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::AuthFailed(_) => ApiError::AuthFailed,
            VoiceError::RecognitionFailed(msg) => ApiError::Transcription(msg),
            VoiceError::SynthesisFailed(msg) => ApiError::Synthesis(msg),
            VoiceError::ApiError(msg) => ApiError::Upstream(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
