use super::{TranscribeError, Transcriber};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

/// Adapter for Deepgram's pre-recorded `/v1/listen` endpoint.
///
/// One POST per call: the full audio payload as the request body, the media
/// type as `Content-Type`, the API key as a `Token` authorization header.
/// The response body is buffered completely before any parse decision.
pub struct DeepgramTranscriber {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: Option<ListenResults>,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: Option<String>,
    confidence: Option<f64>,
}

impl DeepgramTranscriber {
    pub fn new(
        client: reqwest::Client,
        api_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl Transcriber for DeepgramTranscriber {
    async fn transcribe(&self, audio: Bytes, media_type: &str) -> Result<String, TranscribeError> {
        info!(
            "Sending {} bytes of {} audio to {}",
            audio.len(),
            media_type,
            self.api_url
        );

        let response = self
            .client
            .post(&self.api_url)
            .timeout(self.timeout)
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.api_key))
            .header(reqwest::header::CONTENT_TYPE, media_type)
            .body(audio)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();

        // Buffer the whole body before deciding success or failure
        let body = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        parse_listen_response(status, &body)
    }
}

fn classify_transport_error(err: reqwest::Error) -> TranscribeError {
    if err.is_timeout() {
        error!("Transcription request timed out");
        TranscribeError::Timeout
    } else {
        error!("Transcription request failed: {}", err);
        TranscribeError::Network(err)
    }
}

/// Map an HTTP status and buffered body to a transcript or a specific error.
fn parse_listen_response(status: u16, body: &str) -> Result<String, TranscribeError> {
    match status {
        200..=299 => {}
        401 => return Err(TranscribeError::InvalidApiKey),
        403 => return Err(TranscribeError::Forbidden),
        429 => return Err(TranscribeError::RateLimited),
        _ => {
            return Err(TranscribeError::Api {
                status,
                body: body.to_string(),
            })
        }
    }

    let parsed: ListenResponse =
        serde_json::from_str(body).map_err(TranscribeError::MalformedResponse)?;

    let alternative = parsed
        .results
        .and_then(|r| r.channels.into_iter().next())
        .and_then(|c| c.alternatives.into_iter().next());

    match alternative.and_then(|a| a.transcript.map(|t| (t, a.confidence))) {
        Some((transcript, confidence)) if !transcript.is_empty() => {
            info!(
                "Transcription received (confidence: {})",
                confidence
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            );
            Ok(transcript)
        }
        // Deepgram returns an empty transcript for silence; that is still a result
        Some((transcript, _)) => Ok(transcript),
        None => Err(TranscribeError::NoTranscript),
    }
}
