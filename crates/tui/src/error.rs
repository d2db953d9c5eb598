//! Failures that end the program.
//!
//! Per-request API failures are [`crate::client::ClientError`] and stay inside
//! the event loop; these are the ones `main` returns.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid base_url: {0}")]
    BaseUrl(String),
    /// Preferences file or log file could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences are not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("terminal error: {0}")]
    Terminal(String),
}
