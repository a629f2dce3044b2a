use std::path::PathBuf;
use thiserror::Error;

pub use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Theme preference error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Logging setup failed: {0}")]
    Telemetry(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read preferences '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write preferences '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preferences JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Unknown theme '{0}' (expected one of: white, g10, g90, g100)")]
    UnknownTheme(String),

    #[error("No preferences location available (no user config directory)")]
    NoPreferencesPath,
}

pub type Result<T> = std::result::Result<T, UiError>;
