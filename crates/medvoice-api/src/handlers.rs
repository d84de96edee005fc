//! HTTP API handlers
//!
//! Request handlers for the transcription, analysis, and speech endpoints.

use axum::{
    Json,
    body::Body,
    extract::{Multipart, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use medvoice_core::llm::prompts;
use medvoice_core::storage::capture_timestamp;

use crate::error::{ApiError, Result};
use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Transcription response payload
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    /// Raw transcript text
    pub transcription: String,
    /// Extracted medical keywords
    pub keywords: String,
    /// Name of the persisted keywords record
    pub keywords_file: String,
}

/// Analysis request payload
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

/// Analysis response payload
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

/// Speech synthesis request payload
#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: String,
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Medical AI backend is running.".to_string(),
    })
}

/// Transcribe endpoint - audio upload to transcript plus extracted keywords
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("audio.wav").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read audio upload: {}", e)))?;
            upload = Some((filename, data.to_vec()));
            break;
        }
    }

    let Some((filename, data)) = upload else {
        return Err(ApiError::BadRequest("No audio file provided.".to_string()));
    };

    debug!("Transcribe request: {} ({} bytes)", filename, data.len());

    // Capture time names the keywords record, second resolution.
    let timestamp = capture_timestamp();

    let audio_path = state.store.save_upload(&data).await?;

    let outcome = transcribe_and_extract(&state, &data, &filename, &timestamp).await;

    // The temporary audio file is removed on success and failure alike.
    state.store.remove_upload(&audio_path).await;

    let (transcription, keywords, keywords_file) = outcome?;

    info!(
        "Transcription complete: {} chars, keywords saved to {}",
        transcription.len(),
        keywords_file
    );

    Ok(Json(TranscribeResponse {
        transcription,
        keywords,
        keywords_file,
    }))
}

/// Transcription pipeline after the upload is persisted.
async fn transcribe_and_extract(
    state: &AppState,
    data: &[u8],
    filename: &str,
    timestamp: &str,
) -> Result<(String, String, String)> {
    let transcription = state.whisper.transcribe_with_retry(data, filename).await?;

    let prompt = prompts::extraction_prompt(&transcription);
    let keywords = state
        .completion
        .complete(prompts::EXTRACTION_SYSTEM, &prompt)
        .await?;

    let keywords_file = state.store.save_keywords(timestamp, &keywords).await?;

    Ok((transcription, keywords, keywords_file))
}

/// Analyze endpoint - structured medical advice for a transcript
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "No transcription provided.".to_string(),
        ));
    }

    debug!("Analyze request: {} chars", req.text.len());

    let prompt = prompts::analysis_prompt(&req.text);
    let analysis = state
        .completion
        .complete(prompts::ANALYSIS_SYSTEM, &prompt)
        .await?;

    Ok(Json(AnalyzeResponse { analysis }))
}

/// Speak endpoint - synthesized speech as a downloadable mp3
pub async fn speak(
    State(state): State<AppState>,
    Json(req): Json<SpeakRequest>,
) -> Result<Response> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("No text provided".to_string()));
    }

    debug!("Speak request: {} chars", req.text.len());

    let result = state.tts.synthesize(&req.text).await?;

    let audio_path = state.store.save_audio(&result.audio_data).await?;
    let filename = audio_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio.mp3".to_string());

    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));

    let mut response = (
        [(header::CONTENT_TYPE, "audio/mp3")],
        Body::from(result.audio_data),
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}
