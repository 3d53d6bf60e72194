use std::sync::Arc;

use async_trait::async_trait;

use super::transcription_provider::TranscriptionProvider;

/// Builds the provider handle. Called through the warm-up path, so a
/// successful build happens once per process.
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    async fn create(&self) -> Result<Arc<dyn TranscriptionProvider>, InitializationError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum InitializationError {
    #[error("api key required for {0}")]
    MissingApiKey(&'static str),
    #[error("http client build failed: {0}")]
    ClientBuild(String),
    #[error("provider initialization failed: {0}")]
    Failed(String),
}
