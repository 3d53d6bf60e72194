mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CacheSettings, GateSettings, LoggingSettings, ProviderSettings, ServerSettings, Settings,
    SettingsError, WarmupSettings,
};
