use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{InitializationError, ProviderFactory, TranscriptionProvider};

use super::gemini_provider::GeminiProvider;
use super::mock_provider::MockProvider;
use super::openai_whisper_provider::OpenAiWhisperProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Mock,
}

/// Builds the configured provider. Each call constructs a fresh HTTP client,
/// so callers route it through the warm-up path.
pub struct TranscriptionProviderFactory {
    kind: ProviderKind,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    request_timeout: Option<Duration>,
}

impl TranscriptionProviderFactory {
    pub fn new(
        kind: ProviderKind,
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            kind,
            api_key,
            model,
            base_url,
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn require_api_key(&self, provider: &'static str) -> Result<String, InitializationError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .ok_or(InitializationError::MissingApiKey(provider))
    }

    fn build_client(&self) -> Result<reqwest::Client, InitializationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| InitializationError::ClientBuild(e.to_string()))
    }
}

#[async_trait]
impl ProviderFactory for TranscriptionProviderFactory {
    async fn create(&self) -> Result<Arc<dyn TranscriptionProvider>, InitializationError> {
        match self.kind {
            ProviderKind::Gemini => {
                let key = self.require_api_key("Gemini")?;
                let client = self.build_client()?;
                Ok(Arc::new(GeminiProvider::new(
                    client,
                    key,
                    self.base_url.clone(),
                    self.model.clone(),
                )))
            }
            ProviderKind::OpenAi => {
                let key = self.require_api_key("OpenAI Whisper")?;
                let client = self.build_client()?;
                Ok(Arc::new(OpenAiWhisperProvider::new(
                    client,
                    key,
                    self.base_url.clone(),
                    self.model.clone(),
                )))
            }
            ProviderKind::Mock => Ok(Arc::new(MockProvider::default())),
        }
    }
}
