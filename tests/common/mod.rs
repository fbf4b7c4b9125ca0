#![allow(dead_code)] // not every test binary uses every helper

// Shared test doubles for the external collaborators.
//
// Both mocks count invocations so tests can assert that no external call
// happens on validation failures, and that persistence is never attempted
// after a transcription failure.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use vox_scribe::{
    create_router, AppState, NewTranscript, Pipeline, StoreError, TranscribeError,
    TranscriptRecord, TranscriptStore, Transcriber, UploadReceiver,
};

/// Scripted behavior for the mock transcription service.
pub enum Script {
    Ok(String),
    RateLimited,
    InvalidKey,
    Forbidden,
    Timeout,
}

pub struct MockTranscriber {
    script: Script,
    pub calls: AtomicUsize,
}

impl MockTranscriber {
    pub fn with(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: Bytes, _media_type: &str) -> Result<String, TranscribeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Ok(text) => Ok(text.clone()),
            Script::RateLimited => Err(TranscribeError::RateLimited),
            Script::InvalidKey => Err(TranscribeError::InvalidApiKey),
            Script::Forbidden => Err(TranscribeError::Forbidden),
            Script::Timeout => Err(TranscribeError::Timeout),
        }
    }
}

pub struct MockStore {
    fail_inserts: bool,
    fail_lists: bool,
    pub inserts: Mutex<Vec<NewTranscript>>,
    pub insert_calls: AtomicUsize,
    pub seeded: Vec<TranscriptRecord>,
}

impl MockStore {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail_inserts: false,
            fail_lists: false,
            inserts: Mutex::new(Vec::new()),
            insert_calls: AtomicUsize::new(0),
            seeded: Vec::new(),
        })
    }

    pub fn failing_inserts() -> Arc<Self> {
        Arc::new(Self {
            fail_inserts: true,
            ..Self::unwrapped()
        })
    }

    pub fn failing_lists() -> Arc<Self> {
        Arc::new(Self {
            fail_lists: true,
            ..Self::unwrapped()
        })
    }

    pub fn seeded_with(rows: Vec<TranscriptRecord>) -> Arc<Self> {
        Arc::new(Self {
            seeded: rows,
            ..Self::unwrapped()
        })
    }

    fn unwrapped() -> Self {
        Self {
            fail_inserts: false,
            fail_lists: false,
            inserts: Mutex::new(Vec::new()),
            insert_calls: AtomicUsize::new(0),
            seeded: Vec::new(),
        }
    }

    pub fn insert_count(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptStore for MockStore {
    async fn insert(&self, new: NewTranscript) -> Result<TranscriptRecord, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts {
            return Err(StoreError::Api {
                status: 503,
                body: "database unavailable".to_string(),
            });
        }
        let record = TranscriptRecord {
            id: Some(serde_json::json!(1)),
            audio_filename: new.audio_filename.clone(),
            transcription_text: new.transcription_text.clone(),
            file_size: new.file_size,
            created_at: Some(Utc::now()),
        };
        self.inserts.lock().unwrap().push(new);
        Ok(record)
    }

    async fn list_recent(&self) -> Result<Vec<TranscriptRecord>, StoreError> {
        if self.fail_lists {
            return Err(StoreError::Api {
                status: 503,
                body: "database unavailable".to_string(),
            });
        }
        Ok(self.seeded.clone())
    }
}

/// A sample record for history tests.
pub fn record(id: i64, filename: &str, text: &str) -> TranscriptRecord {
    TranscriptRecord {
        id: Some(serde_json::json!(id)),
        audio_filename: filename.to_string(),
        transcription_text: text.to_string(),
        file_size: 1024,
        created_at: Some(Utc::now()),
    }
}

/// Build the real router over mock collaborators and a temp upload dir.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub async fn test_app(
    transcriber: Arc<MockTranscriber>,
    store: Arc<MockStore>,
    max_bytes: u64,
) -> (axum::Router, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let receiver = Arc::new(
        UploadReceiver::new(dir.path(), max_bytes)
            .await
            .expect("upload dir"),
    );
    let pipeline = Arc::new(Pipeline::new(transcriber, store.clone()));
    let state = AppState::new(receiver, pipeline, store);
    (create_router(state), dir)
}

pub const BOUNDARY: &str = "test-boundary-7f9a2c";

/// Hand-built multipart body with a single file part.
pub fn multipart_file(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Two file parts in one body, for the extras-rejected case.
pub fn multipart_two_files(data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename) in [("audio", "one.wav"), ("audio", "two.wav")] {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
