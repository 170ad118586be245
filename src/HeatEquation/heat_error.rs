use thiserror::Error;

/// Errors produced while configuring or running a heat-equation problem
#[derive(Debug, Error)]
pub enum HeatError {
    /// Grid, physical constants, time span or step size cannot describe a valid problem
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// State vector does not match the operator dimension
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Something required was not set or not computed yet
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
