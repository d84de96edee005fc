//! OpenAI chat completion HTTP client

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};

use super::types::*;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat completion client
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CompletionClient {
    /// Create a new completion client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(Error::Http)?;

        let base_url = config
            .openai
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            api_key: config.openai.api_key.clone(),
            model: config.openai.chat_model.clone(),
            base_url,
        })
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run a single chat completion with a system and user message.
    ///
    /// One attempt, no retry. Returns the first choice's text, trimmed.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: None,
        };

        let response = self.chat(request).await?;
        Ok(response.first_text().trim().to_string())
    }

    /// Send a chat completion request.
    pub async fn chat(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Sending chat completion request: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!("OpenAI authentication failed: {} - {}", status, body);
            return Err(Error::AuthFailed(format!("{}: {}", status, body)));
        }

        if !status.is_success() {
            warn!("OpenAI API error: {} - {}", status, body);
            return Err(Error::Api(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Api(format!("Failed to parse response: {} - {}", e, body)))?;

        info!(
            "Chat completion response: finish_reason={:?}, tokens={}",
            parsed.choices.first().and_then(|c| c.finish_reason.clone()),
            parsed
                .usage
                .as_ref()
                .map(|u| u.completion_tokens)
                .unwrap_or(0)
        );

        Ok(parsed)
    }
}
