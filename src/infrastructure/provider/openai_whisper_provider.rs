use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{ProviderError, TranscriptionProvider};
use crate::domain::AudioUpload;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_WHISPER_MODEL: &str = "whisper-1";

pub struct OpenAiWhisperProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperProvider {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_WHISPER_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionProvider for OpenAiWhisperProvider {
    async fn transcribe(
        &self,
        audio: &AudioUpload,
        instruction: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio.data.to_vec())
            .file_name(audio.filename.clone())
            .mime_str(&audio.mime_type)
            .map_err(|e| ProviderError::UploadFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .text("prompt", instruction.to_string())
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("body: {}", e)))?;

        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        tracing::info!(
            chars = transcript.len(),
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript.to_string())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
