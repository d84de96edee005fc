//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{analyze, health, speak, transcribe};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/", get(health))
        // Voice pipeline
        .route("/transcribe", post(transcribe))
        .route("/analyze", post(analyze))
        .route("/speak", post(speak))
}
