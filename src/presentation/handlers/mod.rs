mod error;
mod health;
mod maintenance;
mod transcription;

pub use error::{ErrorBody, ErrorResponse, error_response};
pub use health::health_handler;
pub use maintenance::{clear_cache_handler, metrics_handler, warmup_handler};
pub use transcription::transcription_handler;
