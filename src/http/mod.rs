//! HTTP API surface for the transcription service
//!
//! - GET / - liveness greeting
//! - POST /api/transcribe - upload one audio file, transcribe and record it
//! - GET /api/transcriptions - list transcript records, newest first

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, TranscribeResponse};
pub use routes::create_router;
pub use state::AppState;
