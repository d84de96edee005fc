//! Text-to-Speech synthesis using the OpenAI TTS API

use reqwest::Client;
use tracing::{debug, info};

use crate::error::{Result, VoiceError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// TTS configuration
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// API key
    pub api_key: String,
    /// Model to use
    pub model: String,
    /// Voice to use
    pub voice: String,
    /// Custom API endpoint (tests, proxies)
    pub base_url: Option<String>,
}

impl TtsConfig {
    /// Create a new TTS configuration
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            base_url: None,
        }
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the voice
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set a custom API endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

/// TTS synthesis result
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// MP3-encoded audio data
    pub audio_data: Vec<u8>,
    /// Content type reported by the service
    pub content_type: String,
}

/// TTS client for speech synthesis
pub struct TtsClient {
    client: Client,
    config: TtsConfig,
}

impl TtsClient {
    /// Create a new TTS client
    pub fn new(config: TtsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| VoiceError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Synthesize speech from text, returning MP3 audio.
    pub async fn synthesize(&self, text: &str) -> Result<SynthesisResult> {
        let url = format!("{}/audio/speech", self.config.base_url());

        debug!(
            "Synthesizing speech: {} chars, model: {}, voice: {}",
            text.len(),
            self.config.model,
            self.config.voice
        );

        let body = serde_json::json!({
            "model": self.config.model,
            "input": text,
            "voice": self.config.voice,
            "response_format": "mp3",
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
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
            return Err(VoiceError::SynthesisFailed(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| VoiceError::SynthesisFailed(format!("Failed to read audio data: {}", e)))?;

        info!(
            "Synthesis complete: {} bytes, content-type: {}",
            audio_data.len(),
            content_type
        );

        Ok(SynthesisResult {
            audio_data: audio_data.to_vec(),
            content_type,
        })
    }
}
