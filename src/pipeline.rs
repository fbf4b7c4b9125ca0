//! Transcription Pipeline: the one orchestrating operation of this service.
//!
//! Given an accepted upload, it reads the file, calls the transcription
//! service, and records the result. The failure policy is asymmetric and
//! deliberate: a transcription error aborts the whole run, while a
//! persistence error is logged and the transcript is still returned to the
//! caller. Losing a row to a transient database outage must not mask a
//! successful transcription.

use crate::store::{NewTranscript, TranscriptStore};
use crate::transcription::{TranscribeError, Transcriber};
use crate::upload::StoredUpload;
use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read uploaded file: {0}")]
    ReadUpload(#[source] std::io::Error),

    #[error(transparent)]
    Transcription(#[from] TranscribeError),
}

/// Composite result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Server-assigned stored filename
    pub filename: String,
    /// Recognized text, possibly empty
    pub transcription: String,
    /// Whether the record reached the persistence service
    pub saved: bool,
    /// Identifier assigned by the persistence service, if saved
    pub record_id: Option<serde_json::Value>,
}

pub struct Pipeline {
    transcriber: Arc<dyn Transcriber>,
    store: Arc<dyn TranscriptStore>,
}

impl Pipeline {
    pub fn new(transcriber: Arc<dyn Transcriber>, store: Arc<dyn TranscriptStore>) -> Self {
        Self { transcriber, store }
    }

    /// Transcribe one stored upload and record the result.
    ///
    /// The stored file is left on disk whatever the outcome; retention of
    /// the transient directory is the operator's concern.
    pub async fn run(&self, upload: &StoredUpload) -> Result<PipelineOutcome, PipelineError> {
        // Full-buffer read: simple, and bounded by the upload size ceiling
        let audio = tokio::fs::read(&upload.path)
            .await
            .map_err(PipelineError::ReadUpload)?;

        let media_type = media_type_for_path(&upload.path);
        info!(
            "Transcribing {} ({} bytes, {})",
            upload.filename, upload.size, media_type
        );

        let transcription = self
            .transcriber
            .transcribe(Bytes::from(audio), media_type)
            .await?;

        info!("Transcription completed for {}", upload.filename);

        // Persistence is best-effort: failure is logged, never escalated
        let mut saved = false;
        let mut record_id = None;
        match self
            .store
            .insert(NewTranscript {
                audio_filename: upload.filename.clone(),
                transcription_text: transcription.clone(),
                file_size: upload.size,
            })
            .await
        {
            Ok(record) => {
                saved = true;
                record_id = record.id;
                info!("Saved transcript record for {}", upload.filename);
            }
            Err(e) => {
                error!("Failed to save transcript record: {}", e);
            }
        }

        Ok(PipelineOutcome {
            filename: upload.filename.clone(),
            transcription,
            saved,
            record_id,
        })
    }
}

/// Derive a media type from the stored file's extension.
///
/// Unrecognized extensions fall back to `audio/mpeg`, letting the
/// transcription service sniff the container itself.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "audio/mpeg",
    }
}
