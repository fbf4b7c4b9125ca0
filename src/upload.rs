//! Upload Receiver: validates and stores exactly one audio file per request.
//!
//! Files land in a transient directory under a timestamp-qualified name, so
//! concurrent uploads never collide. Validation happens field by field: the
//! declared media type is checked before a single payload byte is read, and
//! the size ceiling is enforced while buffering.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Multipart field that must carry the audio file.
pub const AUDIO_FIELD: &str = "audio";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No audio file uploaded")]
    NoFile,

    #[error("Only audio files are allowed, got {0}")]
    NotAudio(String),

    #[error("File too large. Maximum size is {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Unexpected extra file in field '{0}', exactly one file is accepted")]
    UnexpectedFile(String),

    #[error("Malformed multipart request: {0}")]
    Multipart(MultipartError),

    #[error("Failed to store uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

/// An upload accepted into transient storage.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Full path of the stored file
    pub path: PathBuf,
    /// Server-assigned name: `<upload-millis>-<original name>`
    pub filename: String,
    /// Client-supplied name, path components stripped
    pub original_name: String,
    /// Size in bytes
    pub size: u64,
}

pub struct UploadReceiver {
    dir: PathBuf,
    max_bytes: u64,
}

impl UploadReceiver {
    /// Create a receiver over the transient directory, creating it if needed.
    pub async fn new(dir: impl Into<PathBuf>, max_bytes: u64) -> std::io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir, max_bytes })
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Accept exactly one audio file from the request's multipart body.
    ///
    /// Text fields are ignored; a second file part in any field is rejected.
    /// The file is written to disk only after both validations pass.
    pub async fn receive(&self, multipart: &mut Multipart) -> Result<StoredUpload, UploadError> {
        let mut stored: Option<StoredUpload> = None;

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| self.map_multipart_error(e))?
        {
            let field_name = field.name().unwrap_or_default().to_string();
            let Some(original) = field.file_name().map(sanitize_filename) else {
                continue;
            };

            if stored.is_some() || field_name != AUDIO_FIELD {
                return Err(UploadError::UnexpectedFile(field_name));
            }

            // Media type check happens before any payload bytes are read
            let media_type = field.content_type().unwrap_or_default().to_string();
            if !media_type.starts_with("audio/") {
                return Err(UploadError::NotAudio(media_type));
            }

            let mut buf: Vec<u8> = Vec::new();
            while let Some(chunk) = field
                .chunk()
                .await
                .map_err(|e| self.map_multipart_error(e))?
            {
                if buf.len() as u64 + chunk.len() as u64 > self.max_bytes {
                    return Err(UploadError::TooLarge {
                        limit: self.max_bytes,
                    });
                }
                buf.extend_from_slice(&chunk);
            }

            let filename = format!("{}-{}", Utc::now().timestamp_millis(), original);
            let path = self.dir.join(&filename);
            let size = buf.len() as u64;
            tokio::fs::write(&path, buf).await?;

            info!("File uploaded: {} ({} bytes)", filename, size);

            stored = Some(StoredUpload {
                path,
                filename,
                original_name: original,
                size,
            });
        }

        stored.ok_or(UploadError::NoFile)
    }

    /// The multipart engine enforces the outer request body limit; when that
    /// is what tripped, report it as the same "too large" condition as our
    /// own per-file check.
    fn map_multipart_error(&self, err: MultipartError) -> UploadError {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge {
                limit: self.max_bytes,
            }
        } else {
            UploadError::Multipart(err)
        }
    }
}

/// Keep only the final path component of the client-supplied name.
fn sanitize_filename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}
