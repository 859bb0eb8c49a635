pub mod app_config;
pub mod config;
pub mod inputs;
pub mod settings;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use inputs::{load_input_urls, parse_input_urls};
pub use settings::{
    load_settings, resolve_settings, HttpSettings, OutputSettings, RawSetting, ScraperSettings,
    Settings,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
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
        source: serde_yaml::Error,
    },

    #[error("failed to read input file {path}: {source}")]
    InputFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid settings: {0}")]
    Validation(String),
}
