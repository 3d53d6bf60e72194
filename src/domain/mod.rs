mod audio_upload;
mod cache_key;
mod transcript;
mod transcription_prompt;
mod transcription_request;

pub use audio_upload::AudioUpload;
pub use cache_key::CacheKey;
pub use transcript::Transcript;
pub use transcription_prompt::{BASE_INSTRUCTION, render_instruction};
pub use transcription_request::TranscriptionRequest;
