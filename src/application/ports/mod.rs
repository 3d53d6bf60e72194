mod provider_factory;
mod transcription_provider;

pub use provider_factory::{InitializationError, ProviderFactory};
pub use transcription_provider::{ProviderError, TranscriptionProvider};
