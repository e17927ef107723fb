use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrafficWatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read fixture file '{path}': {source}")]
    ReadFixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture JSON: {0}")]
    ParseFixture(#[from] serde_json::Error),

    #[error("Invalid fixture: {message}")]
    InvalidFixture { message: String },

    #[error("Violation not found: {0}")]
    ViolationNotFound(u32),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown violation type: {0}")]
    UnknownType(String),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

pub type Result<T> = std::result::Result<T, TrafficWatchError>;
