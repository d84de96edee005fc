//! medvoice-api: HTTP API for the medvoice backend
//!
//! REST endpoints for audio transcription, transcript analysis, and speech
//! synthesis. Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{AppState, app, start_server};
