pub mod config;
pub mod http;
pub mod pipeline;
pub mod store;
pub mod transcription;
pub mod upload;

pub use config::{Config, Secrets};
pub use http::{create_router, AppState};
pub use pipeline::{Pipeline, PipelineError, PipelineOutcome};
pub use store::{NewTranscript, StoreError, SupabaseStore, TranscriptRecord, TranscriptStore};
pub use transcription::{DeepgramTranscriber, TranscribeError, Transcriber};
pub use upload::{StoredUpload, UploadError, UploadReceiver};
