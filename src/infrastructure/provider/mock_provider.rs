use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ProviderError, TranscriptionProvider};
use crate::domain::AudioUpload;

/// Canned provider for local runs without credentials.
pub struct MockProvider {
    transcript: String,
    delay: Duration,
}

impl MockProvider {
    pub fn new(transcript: impl Into<String>, delay: Duration) -> Self {
        Self {
            transcript: transcript.into(),
            delay,
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Mock transcription", Duration::ZERO)
    }
}

#[async_trait]
impl TranscriptionProvider for MockProvider {
    async fn transcribe(
        &self,
        audio: &AudioUpload,
        _instruction: &str,
    ) -> Result<String, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::debug!(filename = %audio.filename, "Mock provider returning canned transcript");
        Ok(self.transcript.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
