/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            ..Self::default()
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            json_format: false,
            default_filter: "info,transcribe_gateway=debug,tower_http=debug".to_string(),
        }
    }
}
