//! Speech-to-text adapter boundary.
//!
//! The pipeline talks to the external recognition service through the
//! [`Transcriber`] trait; [`DeepgramTranscriber`] is the production
//! implementation, and tests substitute their own.

mod deepgram;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use deepgram::DeepgramTranscriber;

/// Errors from one transcription exchange.
///
/// Each variant carries a distinct message so callers can tell an expired
/// key from a rate limit without inspecting upstream status codes.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("transcription API key is invalid or expired")]
    InvalidApiKey,

    #[error("transcription API access forbidden - check your plan")]
    Forbidden,

    #[error("transcription API rate limit exceeded")]
    RateLimited,

    #[error("transcription API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse transcription response")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("no transcript found in transcription response")]
    NoTranscript,

    #[error("transcription request timed out")]
    Timeout,

    #[error("transcription request failed: {0}")]
    Network(#[source] reqwest::Error),
}

/// One request/response exchange with a speech recognition service.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe raw audio bytes with the given media type to plain text.
    async fn transcribe(&self, audio: Bytes, media_type: &str) -> Result<String, TranscribeError>;
}
