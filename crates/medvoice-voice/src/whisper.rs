//! Speech recognition using the OpenAI Whisper API
//!
//! The transcription call is the one network call in the system with retry
//! semantics: a bounded number of attempts with a fixed delay between them.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, VoiceError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the Whisper client
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// API key
    pub api_key: String,
    /// Model to use (e.g., "whisper-1")
    pub model: String,
    /// Custom API endpoint (tests, proxies)
    pub base_url: Option<String>,
    /// Attempts before giving up
    pub max_attempts: u32,
    /// Delay between failed attempts
    pub retry_delay: Duration,
}

impl WhisperConfig {
    /// Create a new Whisper configuration with default retry behavior.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "whisper-1".to_string(),
            base_url: None,
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
        }
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom API endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set retry behavior
    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

/// Transcription result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
}

/// Whisper client for speech recognition
pub struct WhisperClient {
    client: Client,
    config: WhisperConfig,
}

impl WhisperClient {
    /// Create a new Whisper client
    pub fn new(config: WhisperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| VoiceError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Transcribe audio bytes, single attempt.
    pub async fn transcribe(&self, audio_data: &[u8], filename: &str) -> Result<TranscriptionResult> {
        let url = format!("{}/audio/transcriptions", self.config.base_url());

        debug!(
            "Transcribing audio: {} bytes, filename: {}, model: {}",
            audio_data.len(),
            filename,
            self.config.model
        );

        let form = reqwest::multipart::Form::new()
            .text("model", self.config.model.clone())
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio_data.to_vec())
                    .file_name(filename.to_string())
                    .mime_str("audio/wav")
                    .map_err(|e| VoiceError::ApiError(format!("Failed to set mime type: {}", e)))?,
            );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| VoiceError::ApiError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VoiceError::AuthFailed(format!("{}: {}", status, error_text)));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VoiceError::RecognitionFailed(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let result: TranscriptionResult = response
            .json()
            .await
            .map_err(|e| VoiceError::RecognitionFailed(format!("Failed to parse response: {}", e)))?;

        info!("Transcription complete: {} characters", result.text.len());

        Ok(result)
    }

    /// Transcribe with bounded retry.
    ///
    /// Service-level failures are logged and retried after a fixed delay, up
    /// to the configured attempt count. Authentication failures abort
    /// immediately. An exhausted retry budget or an empty transcript both
    /// surface as a recognition failure.
    pub async fn transcribe_with_retry(&self, audio_data: &[u8], filename: &str) -> Result<String> {
        let mut transcription = String::new();

        for attempt in 1..=self.config.max_attempts {
            match self.transcribe(audio_data, filename).await {
                Ok(result) => {
                    transcription = result.text;
                    break;
                }
                Err(VoiceError::AuthFailed(msg)) => {
                    return Err(VoiceError::AuthFailed(msg));
                }
                Err(e) => {
                    warn!(
                        "Transcription attempt {}/{} failed: {}",
                        attempt, self.config.max_attempts, e
                    );
                    if attempt < self.config.max_attempts {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        if transcription.is_empty() {
            return Err(VoiceError::RecognitionFailed(
                "Transcription failed or audio was empty.".to_string(),
            ));
        }

        Ok(transcription)
    }
}
