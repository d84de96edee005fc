//! HTTP API Server
//!
//! Builds the shared application state and runs the axum server.

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use medvoice_core::{CompletionClient, Config, FileStore};
use medvoice_voice::{TtsClient, TtsConfig, WhisperClient, WhisperConfig};

use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<CompletionClient>,
    pub whisper: Arc<WhisperClient>,
    pub tts: Arc<TtsClient>,
    pub store: FileStore,
}

impl AppState {
    /// Build all clients and the file store from configuration.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let completion = CompletionClient::new(config)?;

        let mut whisper_config = WhisperConfig::new(&config.openai.api_key)
            .with_model(&config.openai.whisper_model);
        if let Some(base_url) = &config.openai.base_url {
            whisper_config = whisper_config.with_base_url(base_url);
        }
        let whisper = WhisperClient::new(whisper_config)?;

        let mut tts_config = TtsConfig::new(&config.openai.api_key)
            .with_model(&config.openai.tts_model)
            .with_voice(&config.openai.tts_voice);
        if let Some(base_url) = &config.openai.base_url {
            tts_config = tts_config.with_base_url(base_url);
        }
        let tts = TtsClient::new(tts_config)?;

        let store = FileStore::new(&config.storage).await?;

        Ok(Self {
            completion: Arc::new(completion),
            whisper: Arc::new(whisper),
            tts: Arc::new(tts),
            store,
        })
    }
}

/// Build the application router with CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP API server
pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
