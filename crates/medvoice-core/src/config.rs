//! Configuration management
//!
//! Settings are resolved in the following priority order:
//! 1. Environment variables
//! 2. medvoice.toml configuration file
//! 3. Defaults
//!
//! `${VAR_NAME}` strings inside the configuration file are expanded from the
//! process environment before parsing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// OpenAI service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (required)
    pub api_key: String,

    /// Chat completion model
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Transcription model
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    /// Speech synthesis model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Speech synthesis voice
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,

    /// Base URL (optional, for custom endpoints and tests)
    pub base_url: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            chat_model: default_chat_model(),
            whisper_model: default_whisper_model(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
            base_url: None,
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Port for the HTTP server
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
        }
    }
}

/// File storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for transient audio uploads
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Directory for extracted keyword records
    #[serde(default = "default_keywords_dir")]
    pub keywords_dir: String,

    /// Directory for synthesized speech output
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            keywords_dir: default_keywords_dir(),
            audio_dir: default_audio_dir(),
        }
    }
}

/// Main configuration for medvoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenAI configuration
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// HTTP API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_chat_model() -> String {
    "gpt-4".to_string()
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_voice() -> String {
    "alloy".to_string()
}

fn default_api_port() -> u16 {
    5000
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_keywords_dir() -> String {
    "keywords".to_string()
}

fn default_audio_dir() -> String {
    "static".to_string()
}

impl Config {
    /// Expand `${VAR_NAME}` occurrences from the process environment.
    ///
    /// Missing variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file.
    ///
    /// `${VAR_NAME}` strings in the file are expanded from the environment,
    /// then explicit environment variables override the parsed values.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let mut config: Config = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// Uses `./medvoice.toml` if present, otherwise environment variables only.
    pub fn load() -> crate::Result<Self> {
        if Path::new("medvoice.toml").exists() {
            return Self::from_toml_file("medvoice.toml");
        }

        Self::from_env()
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config {
            openai: OpenAiConfig::default(),
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override configuration values from the environment.
    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.is_empty() {
                self.openai.api_key = api_key;
            }
        }
        if let Ok(model) = std::env::var("OPENAI_CHAT_MODEL") {
            if !model.is_empty() {
                self.openai.chat_model = model;
            }
        }
        if let Ok(model) = std::env::var("OPENAI_WHISPER_MODEL") {
            if !model.is_empty() {
                self.openai.whisper_model = model;
            }
        }
        if let Ok(model) = std::env::var("OPENAI_TTS_MODEL") {
            if !model.is_empty() {
                self.openai.tts_model = model;
            }
        }
        if let Ok(voice) = std::env::var("OPENAI_TTS_VOICE") {
            if !voice.is_empty() {
                self.openai.tts_voice = voice;
            }
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            if !base_url.is_empty() {
                self.openai.base_url = Some(base_url);
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            if !dir.is_empty() {
                self.storage.upload_dir = dir;
            }
        }
        if let Ok(dir) = std::env::var("KEYWORDS_DIR") {
            if !dir.is_empty() {
                self.storage.keywords_dir = dir;
            }
        }
        if let Ok(dir) = std::env::var("AUDIO_DIR") {
            if !dir.is_empty() {
                self.storage.audio_dir = dir;
            }
        }
    }

    /// Startup fails immediately without a credential.
    fn validate(&self) -> crate::Result<()> {
        if self.openai.api_key.is_empty() {
            return Err(Error::Config(
                "Missing OpenAI API key. Set OPENAI_API_KEY in your environment or .env file."
                    .to_string(),
            ));
        }
        Ok(())
    }
}
