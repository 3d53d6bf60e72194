use async_trait::async_trait;

use crate::domain::AudioUpload;

/// Remote speech-to-text backend.
///
/// A single call covers the whole exchange with the provider, including any
/// upload and cleanup of remote files it needs.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    async fn transcribe(
        &self,
        audio: &AudioUpload,
        instruction: &str,
    ) -> Result<String, ProviderError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("file upload failed: {0}")]
    UploadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("provider returned an empty transcription")]
    EmptyResponse,
}
