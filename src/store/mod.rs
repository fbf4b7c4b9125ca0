//! Persistence boundary for transcript records.
//!
//! Records live entirely in the external service; this crate only inserts
//! and lists them through the [`TranscriptStore`] trait. Records are
//! immutable once created, so no update or delete operation exists.

mod supabase;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use supabase::SupabaseStore;

/// A persisted row associating an uploaded file with its recognized text.
///
/// `id` and `created_at` are assigned by the persistence service on insert;
/// `id` stays opaque JSON since the table may key on an integer or a uuid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub audio_filename: String,
    pub transcription_text: String,
    pub file_size: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new record. The service fills in id and created_at.
#[derive(Debug, Clone, Serialize)]
pub struct NewTranscript {
    pub audio_filename: String,
    pub transcription_text: String,
    pub file_size: u64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("store returned no row for insert")]
    EmptyInsert,

    #[error("failed to decode store response")]
    Decode(#[source] serde_json::Error),

    #[error("store request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Insert and ordered-retrieval operations on the external record store.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Insert one record; returns the stored row with its assigned id.
    async fn insert(&self, new: NewTranscript) -> Result<TranscriptRecord, StoreError>;

    /// Fetch all records, newest first. No pagination or limit.
    async fn list_recent(&self) -> Result<Vec<TranscriptRecord>, StoreError>;
}
