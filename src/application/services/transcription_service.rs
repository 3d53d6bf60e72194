use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::ports::{
    InitializationError, ProviderError, ProviderFactory, TranscriptionProvider,
};
use crate::domain::{Transcript, TranscriptionRequest};

use super::concurrency_gate::ConcurrencyGate;
use super::transcript_cache::{CacheStats, TranscriptCache};
use super::warm_state::WarmState;

/// Per-request flow: fingerprint, cache lookup, then on a miss a gated
/// provider call whose result is cached.
///
/// One instance is built at startup and shared by every request handler.
pub struct TranscriptionService {
    cache: Arc<TranscriptCache>,
    gate: Arc<ConcurrencyGate>,
    provider_factory: Arc<dyn ProviderFactory>,
    provider: WarmState<Arc<dyn TranscriptionProvider>>,
    gate_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStats {
    pub prewarmed: bool,
    pub cache: CacheStats,
    pub gate_capacity: usize,
    pub gate_in_use: usize,
}

impl TranscriptionService {
    pub fn new(
        cache: Arc<TranscriptCache>,
        gate: Arc<ConcurrencyGate>,
        provider_factory: Arc<dyn ProviderFactory>,
        gate_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            gate,
            provider_factory,
            provider: WarmState::new(),
            gate_timeout,
        }
    }

    /// Builds the provider handle if no earlier call has done so.
    pub async fn warm_up(&self) -> Result<Arc<dyn TranscriptionProvider>, InitializationError> {
        let factory = Arc::clone(&self.provider_factory);
        let provider = self
            .provider
            .ensure_warm(|| async move {
                let started = Instant::now();
                let provider = factory.create().await.inspect_err(|e| {
                    tracing::error!(error = %e, "Transcription provider initialization failed");
                })?;
                tracing::info!(
                    provider = provider.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Transcription provider initialized"
                );
                Ok::<_, InitializationError>(provider)
            })
            .await?;
        Ok(Arc::clone(provider))
    }

    #[tracing::instrument(
        skip(self, request),
        fields(filename = %request.audio.filename, bytes = request.audio.size_bytes())
    )]
    pub async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<Transcript, TranscriptionServiceError> {
        if request.audio.data.is_empty() {
            return Err(TranscriptionServiceError::Validation(
                "audio file is empty".to_string(),
            ));
        }

        let instruction = request.instruction();
        let key = request.cache_key();

        if let Some(text) = self.cache.get(&key) {
            tracing::debug!(key = %key.short(), "Transcript cache hit");
            return Ok(Transcript::from_cache(text));
        }
        tracing::debug!(key = %key.short(), "Transcript cache miss");

        let provider = self.warm_up().await?;

        let wait_started = Instant::now();
        let Some(permit) = self.gate.acquire(self.gate_timeout).await else {
            tracing::warn!(
                timeout_ms = self.gate_timeout.as_millis() as u64,
                in_use = self.gate.in_use(),
                "No provider slot available"
            );
            return Err(TranscriptionServiceError::ResourceExhausted {
                timeout_ms: self.gate_timeout.as_millis() as u64,
            });
        };
        let waited_ms = wait_started.elapsed().as_millis() as u64;

        let call_started = Instant::now();
        let result = provider.transcribe(&request.audio, &instruction).await;
        permit.release();

        let text = result
            .inspect_err(|e| tracing::error!(error = %e, "Provider call failed"))?
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse.into());
        }

        tracing::info!(
            key = %key.short(),
            provider = provider.name(),
            chars = text.len(),
            waited_ms,
            elapsed_ms = call_started.elapsed().as_millis() as u64,
            "Transcription completed"
        );

        self.cache.set(key, text.clone());
        Ok(Transcript::fresh(text))
    }

    pub fn clear_cache(&self) -> usize {
        let removed = self.cache.clear();
        tracing::info!(removed, "Transcript cache cleared");
        removed
    }

    pub fn is_warm(&self) -> bool {
        self.provider.is_warm()
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            prewarmed: self.is_warm(),
            cache: self.cache.stats(),
            gate_capacity: self.gate.capacity(),
            gate_in_use: self.gate.in_use(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("no provider slot became free within {timeout_ms} ms")]
    ResourceExhausted { timeout_ms: u64 },
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),
    #[error("initialization: {0}")]
    Initialization(#[from] InitializationError),
}
