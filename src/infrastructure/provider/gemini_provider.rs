use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{ProviderError, TranscriptionProvider};
use crate::domain::AudioUpload;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";
const UPLOAD_BOUNDARY: &str = "transcribe-gateway-upload";

/// Gemini adapter: upload through the Files API, prompt `generateContent`
/// with a reference to the uploaded file, then delete the remote file.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    file: RemoteFile,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteFile {
    name: String,
    uri: String,
    mime_type: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiProvider {
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
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        }
    }

    async fn upload(&self, audio: &AudioUpload) -> Result<RemoteFile, ProviderError> {
        let url = format!("{}/upload/v1beta/files", self.base_url);

        tracing::debug!(
            bytes = audio.size_bytes(),
            mime_type = %audio.mime_type,
            "Uploading audio to Gemini Files API"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("X-Goog-Upload-Protocol", "multipart")
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", UPLOAD_BOUNDARY),
            )
            .body(upload_body(audio))
            .send()
            .await
            .map_err(|e| ProviderError::UploadFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::UploadFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("upload response: {}", e)))?;

        Ok(uploaded.file)
    }

    async fn generate(
        &self,
        file: &RemoteFile,
        fallback_mime: &str,
        instruction: &str,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{
                "parts": [
                    { "text": instruction },
                    {
                        "file_data": {
                            "mime_type": file.mime_type.as_deref().unwrap_or(fallback_mime),
                            "file_uri": file.uri,
                        }
                    }
                ]
            }]
        });

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
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

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("parse response: {}", e)))?;

        let text: String = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    async fn delete(&self, file: &RemoteFile) {
        let url = format!("{}/v1beta/{}", self.base_url, file.name);
        let result = self
            .client
            .delete(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        if let Err(e) = result {
            tracing::warn!(error = %e, file = %file.name, "Failed to delete uploaded file");
        }
    }
}

/// `multipart/related` body: JSON file metadata, then the raw media part.
fn upload_body(audio: &AudioUpload) -> Vec<u8> {
    let metadata = json!({ "file": { "display_name": audio.filename } });
    let mut body = Vec::with_capacity(audio.size_bytes() + 256);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n--{b}\r\nContent-Type: {mime}\r\n\r\n",
            b = UPLOAD_BOUNDARY,
            mime = audio.mime_type,
        )
        .as_bytes(),
    );
    body.extend_from_slice(&audio.data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", UPLOAD_BOUNDARY).as_bytes());
    body
}

#[async_trait]
impl TranscriptionProvider for GeminiProvider {
    async fn transcribe(
        &self,
        audio: &AudioUpload,
        instruction: &str,
    ) -> Result<String, ProviderError> {
        let file = self.upload(audio).await?;
        let result = self.generate(&file, &audio.mime_type, instruction).await;
        self.delete(&file).await;

        let transcript = result?;
        tracing::info!(
            model = %self.model,
            chars = transcript.len(),
            "Gemini transcription completed"
        );
        Ok(transcript)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
