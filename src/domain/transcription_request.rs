use super::audio_upload::AudioUpload;
use super::cache_key::CacheKey;
use super::transcription_prompt::render_instruction;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    pub audio: AudioUpload,
    pub language: Option<String>,
    pub prompt: Option<String>,
}

impl TranscriptionRequest {
    pub fn new(audio: AudioUpload) -> Self {
        Self {
            audio,
            language: None,
            prompt: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn instruction(&self) -> String {
        render_instruction(self.language.as_deref(), self.prompt.as_deref())
    }

    /// Key over the audio bytes, the filename and the rendered instruction.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::fingerprint(&self.audio.data, &self.audio.filename, &self.instruction())
    }
}
