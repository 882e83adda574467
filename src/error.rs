//! Error types for persistence backends

use thiserror::Error;

/// Failure to read or write persisted values
///
/// Never fatal: callers log it and fall back to defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Write not confirmed for key '{key}'")]
    Unconfirmed { key: String },
}
