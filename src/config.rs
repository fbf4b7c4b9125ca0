use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub upload: UploadConfig,
    pub transcription: TranscriptionConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct UploadConfig {
    /// Transient directory for uploaded audio files
    pub dir: String,
    /// Upload size ceiling in bytes
    pub max_bytes: u64,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptionConfig {
    /// Deepgram pre-recorded listen endpoint
    pub api_url: String,
    /// Per-request timeout for the transcription call, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Supabase table holding transcript records
    pub table: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Credentials for the external services.
///
/// Read strictly from the environment with no fallback values: the binary
/// refuses to start without them rather than shipping a baked-in key.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub deepgram_api_key: String,
    pub supabase_url: String,
    pub supabase_api_key: String,
}

impl Secrets {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            deepgram_api_key: std::env::var("DEEPGRAM_API_KEY")
                .context("DEEPGRAM_API_KEY must be set")?,
            supabase_url: std::env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?,
            supabase_api_key: std::env::var("SUPABASE_API_KEY")
                .context("SUPABASE_API_KEY must be set")?,
        })
    }
}
