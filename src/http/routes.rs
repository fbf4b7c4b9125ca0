use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    // Body limit sits above the upload ceiling so oversize files reach the
    // receiver's own size check and get the distinct "too large" response
    let body_limit = (state.receiver.max_bytes() as usize).saturating_mul(2);

    Router::new()
        // Liveness greeting
        .route("/", get(handlers::root))
        // Transcription pipeline
        .route("/api/transcribe", post(handlers::transcribe))
        // History query
        .route("/api/transcriptions", get(handlers::list_transcriptions))
        .layer(DefaultBodyLimit::max(body_limit))
        // Browser clients call from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
