use std::result::Result as StdResult;

use thiserror::Error;

use crate::core::validation::ValidationReport;

/// Unified error type for the domain, storage, and export layers.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid expense: {0}")]
    Validation(ValidationReport),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Export failed: {0}")]
    Export(String),
}

pub type Result<T> = StdResult<T, TrackerError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        TrackerError::Export(err.to_string())
    }
}
