use crate::pipeline::Pipeline;
use crate::store::TranscriptStore;
use crate::upload::UploadReceiver;
use std::sync::Arc;

/// Shared application state for HTTP handlers.
///
/// Everything here is constructed once at startup and immutable afterwards;
/// requests share it through `Arc`s and never coordinate with each other.
#[derive(Clone)]
pub struct AppState {
    pub receiver: Arc<UploadReceiver>,
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<dyn TranscriptStore>,
}

impl AppState {
    pub fn new(
        receiver: Arc<UploadReceiver>,
        pipeline: Arc<Pipeline>,
        store: Arc<dyn TranscriptStore>,
    ) -> Self {
        Self {
            receiver,
            pipeline,
            store,
        }
    }
}
