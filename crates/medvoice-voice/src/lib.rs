//! medvoice-voice: speech clients for the medvoice backend
//!
//! Speech recognition (OpenAI Whisper API, with bounded retry) and
//! text-to-speech synthesis (OpenAI TTS API) over `reqwest`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medvoice_voice::{WhisperClient, WhisperConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WhisperClient::new(WhisperConfig::new("your-api-key"))?;
//!
//!     let audio_data = std::fs::read("recording.wav")?;
//!     let text = client.transcribe_with_retry(&audio_data, "recording.wav").await?;
//!
//!     println!("Transcription: {}", text);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod tts;
pub mod whisper;

pub use error::{Result, VoiceError};
pub use tts::{SynthesisResult, TtsClient, TtsConfig};
pub use whisper::{TranscriptionResult, WhisperClient, WhisperConfig};
