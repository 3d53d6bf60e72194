use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::infrastructure::provider::ProviderKind;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub cache: CacheSettings,
    pub gate: GateSettings,
    pub provider: ProviderSettings,
    pub warmup: WarmupSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub max_size: usize,
    /// Zero disables reuse of results.
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GateSettings {
    pub capacity: usize,
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarmupSettings {
    pub on_startup: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl Settings {
    /// Defaults, then `appsettings.<environment>.toml` if present, then
    /// `APP_*` variables (`APP_CACHE__MAX_SIZE=50`).
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.max_upload_mb", 100)?
            .set_default("cache.max_size", 100)?
            .set_default("cache.ttl_seconds", 3600)?
            .set_default("gate.capacity", 10)?
            .set_default("gate.acquire_timeout_ms", 30_000)?
            .set_default("provider.kind", "gemini")?
            .set_default("warmup.on_startup", true)?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cache.max_size == 0 {
            return Err(SettingsError::Invalid {
                field: "cache.max_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.gate.capacity == 0 {
            return Err(SettingsError::Invalid {
                field: "gate.capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.server.max_upload_mb == 0 {
            return Err(SettingsError::Invalid {
                field: "server.max_upload_mb",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl GateSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

impl ProviderSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
