use super::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::upload::UploadError;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub message: String,
    pub filename: String,
    pub transcription: String,
    #[serde(rename = "supabaseSaved")]
    pub supabase_saved: bool,
    /// Serialized even when null, matching the wire contract
    #[serde(rename = "supabaseId")]
    pub supabase_id: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Liveness greeting
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Speech-to-Text Server Running!" }))
}

/// GET /api/transcriptions
/// List all transcript records, newest first
pub async fn list_transcriptions(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_recent().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!("Failed to load transcriptions: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load transcriptions")),
            )
                .into_response()
        }
    }
}

/// POST /api/transcribe
/// Accept one audio upload, transcribe it, and record the result
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    info!("Upload request received");

    // Validation happens entirely before any external call
    let upload = match state.receiver.receive(&mut multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            error!("Upload rejected: {}", e);
            let status = match &e {
                UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                UploadError::NoFile
                | UploadError::NotAudio(_)
                | UploadError::UnexpectedFile(_)
                | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
                UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            return (status, Json(ErrorResponse::new(e.to_string()))).into_response();
        }
    };

    match state.pipeline.run(&upload).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                message: "File transcribed successfully".to_string(),
                filename: outcome.filename,
                transcription: outcome.transcription,
                supabase_saved: outcome.saved,
                supabase_id: outcome.record_id,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Transcription pipeline failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details("Upload failed", e.to_string())),
            )
                .into_response()
        }
    }
}
