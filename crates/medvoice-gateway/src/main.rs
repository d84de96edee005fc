//! medvoice-gateway: Medical Voice Assistant Backend Binary
//!
//! Main entry point for the medvoice HTTP backend.
//!
//! Usage:
//!   medvoice-gateway           - Start the HTTP server
//!   medvoice-gateway --help    - Show help

use medvoice_api::AppState;
use medvoice_core::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_args() {
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration; fails immediately without an API key
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting medvoice-gateway...");
    tracing::info!(
        "Chat model: {}, whisper model: {}",
        config.openai.chat_model,
        config.openai.whisper_model
    );

    let state = AppState::from_config(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build application state: {}", e))?;

    let port = config.api.port;
    let server = tokio::spawn(async move {
        if let Err(e) = medvoice_api::start_server(port, state).await {
            tracing::error!("HTTP API error: {}", e);
        }
    });

    tracing::info!("medvoice-gateway initialized successfully");
    tracing::info!("Press Ctrl+C to exit");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    server.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Handle --help/--version; returns true when the process should exit.
fn handle_args() -> bool {
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return true;
            }
            "--version" | "-v" => {
                println!("medvoice-gateway {}", env!("CARGO_PKG_VERSION"));
                return true;
            }
            _ => {}
        }
    }
    false
}

/// Print help message
fn print_help() {
    println!("medvoice-gateway - Medical Voice Assistant Backend");
    println!();
    println!("Usage:");
    println!("  medvoice-gateway           Start the HTTP server");
    println!("  medvoice-gateway --help    Show this help message");
    println!("  medvoice-gateway --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  OPENAI_API_KEY        OpenAI API key (required)");
    println!("  OPENAI_CHAT_MODEL     Completion model (default: gpt-4)");
    println!("  OPENAI_WHISPER_MODEL  Transcription model (default: whisper-1)");
    println!("  OPENAI_TTS_MODEL      Speech synthesis model (default: tts-1)");
    println!("  OPENAI_TTS_VOICE      Speech synthesis voice (default: alloy)");
    println!("  OPENAI_BASE_URL       Custom API endpoint");
    println!("  PORT                  HTTP port (default: 5000)");
    println!("  UPLOAD_DIR            Audio upload directory (default: uploads)");
    println!("  KEYWORDS_DIR          Keyword record directory (default: keywords)");
    println!("  AUDIO_DIR             Synthesized audio directory (default: static)");
}
