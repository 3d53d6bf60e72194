use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use transcribe_gateway::application::ports::ProviderFactory;
use transcribe_gateway::application::services::{
    ConcurrencyGate, TranscriptCache, TranscriptionService,
};
use transcribe_gateway::infrastructure::observability::{TracingConfig, init_tracing};
use transcribe_gateway::infrastructure::provider::TranscriptionProviderFactory;
use transcribe_gateway::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
    ));

    let cache = Arc::new(TranscriptCache::new(
        settings.cache.max_size,
        settings.cache.ttl(),
    ));
    let gate = Arc::new(ConcurrencyGate::new(settings.gate.capacity));

    let mut factory = TranscriptionProviderFactory::new(
        settings.provider.kind,
        settings.provider.api_key.clone(),
        settings.provider.model.clone(),
        settings.provider.base_url.clone(),
    );
    if let Some(timeout) = settings.provider.request_timeout() {
        factory = factory.with_request_timeout(timeout);
    }
    let provider_factory: Arc<dyn ProviderFactory> = Arc::new(factory);

    let transcription_service = Arc::new(TranscriptionService::new(
        cache,
        gate,
        provider_factory,
        settings.gate.acquire_timeout(),
    ));

    if settings.warmup.on_startup {
        let service = Arc::clone(&transcription_service);
        tokio::spawn(async move {
            if let Err(e) = service.warm_up().await {
                tracing::warn!(error = %e, "Startup pre-warm failed, will retry on first request");
            }
        });
    }

    tracing::info!(
        provider = ?settings.provider.kind,
        cache_max_size = settings.cache.max_size,
        cache_ttl_seconds = settings.cache.ttl_seconds,
        gate_capacity = settings.gate.capacity,
        "Transcription gateway configured"
    );

    let state = AppState {
        transcription_service,
        max_upload_bytes: settings.server.max_upload_bytes(),
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
