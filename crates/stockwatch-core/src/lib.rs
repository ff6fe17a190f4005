pub mod app_config;
pub mod config;
pub mod outcome;
pub mod settings;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use outcome::{CheckOutcome, CheckRecorder, CheckStage, EntryKind, LogEntry, StockResult};
pub use settings::{load_settings, Settings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read settings file {path}: {source}")]
    SettingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    SettingsFileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
