//! Application errors.

use ideaboard_core::SubscriptionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Input error: {0}")]
    Input(#[from] SubscriptionError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
