mod gemini_provider;
mod mock_provider;
mod openai_whisper_provider;
mod provider_factory;

pub use gemini_provider::{DEFAULT_GEMINI_MODEL, GeminiProvider};
pub use mock_provider::MockProvider;
pub use openai_whisper_provider::OpenAiWhisperProvider;
pub use provider_factory::{ProviderKind, TranscriptionProviderFactory};
