mod concurrency_gate;
mod transcript_cache;
mod transcription_service;
mod warm_state;

pub use concurrency_gate::{ConcurrencyGate, GatePermit};
pub use transcript_cache::{BoundedTtlCache, CacheStats, TranscriptCache};
pub use transcription_service::{ServiceStats, TranscriptionService, TranscriptionServiceError};
pub use warm_state::WarmState;
