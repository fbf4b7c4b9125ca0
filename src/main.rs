use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use vox_scribe::{
    AppState, Config, DeepgramTranscriber, Pipeline, Secrets, SupabaseStore, TranscriptStore,
    UploadReceiver,
};

#[derive(Parser, Debug)]
#[command(name = "vox-scribe", about = "Upload-transcribe-persist HTTP service")]
struct Args {
    /// Config file path (without extension, `config` crate convention)
    #[arg(long, default_value = "config/vox-scribe")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let secrets = Secrets::from_env()?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    // One shared HTTP client behind both external-service adapters
    let client = reqwest::Client::new();

    let transcriber = Arc::new(DeepgramTranscriber::new(
        client.clone(),
        cfg.transcription.api_url.clone(),
        secrets.deepgram_api_key.clone(),
        Duration::from_secs(cfg.transcription.timeout_secs),
    ));

    let store: Arc<dyn TranscriptStore> = Arc::new(SupabaseStore::new(
        client,
        secrets.supabase_url.clone(),
        secrets.supabase_api_key.clone(),
        cfg.store.table.clone(),
    ));

    let receiver = Arc::new(
        UploadReceiver::new(&cfg.upload.dir, cfg.upload.max_bytes)
            .await
            .context("Failed to create upload directory")?,
    );

    let pipeline = Arc::new(Pipeline::new(transcriber, store.clone()));

    let state = AppState::new(receiver, pipeline, store);
    let app = vox_scribe::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Upload directory: {}", cfg.upload.dir);
    info!("Transcription timeout: {}s", cfg.transcription.timeout_secs);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
