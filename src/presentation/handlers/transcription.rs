use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{AudioUpload, TranscriptionRequest};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcription_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut audio = None;
    let mut language = None;
    let mut prompt = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(e.status(), format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_owned);
                match field.bytes().await {
                    Ok(data) => {
                        audio = Some(AudioUpload::new(filename, content_type.as_deref(), data))
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return error_response(e.status(), format!("Failed to read file: {}", e));
                    }
                }
            }
            Some("language") => language = field.text().await.ok(),
            Some("prompt") => prompt = field.text().await.ok(),
            _ => {}
        }
    }

    let Some(audio) = audio.filter(|a| !a.filename.is_empty()) else {
        tracing::warn!("Transcription request with no file");
        return error_response(StatusCode::BAD_REQUEST, "No file provided");
    };

    tracing::debug!(
        filename = %audio.filename,
        mime_type = %audio.mime_type,
        bytes = audio.size_bytes(),
        language = ?language,
        prompt = %sanitize_prompt(prompt.as_deref().unwrap_or_default()),
        "Processing transcription upload"
    );

    let mut request = TranscriptionRequest::new(audio);
    request.language = language;
    request.prompt = prompt;

    match state.transcription_service.transcribe(&request).await {
        Ok(transcript) => {
            tracing::info!(
                cached = transcript.cached,
                chars = transcript.text.len(),
                "Transcription request served"
            );
            (
                StatusCode::OK,
                Json(TranscriptionResponse {
                    text: transcript.text,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcription request failed");
            e.into_response()
        }
    }
}
