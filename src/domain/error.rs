use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignAidError {
    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Network failure or unreadable response body
    #[error("Transport error: {0}")]
    Transport(String),

    /// Well-formed error reported by the translation backend
    #[error("{0}")]
    Service(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Another request is already in flight")]
    Busy,

    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SignAidError {
    fn from(err: reqwest::Error) -> Self {
        SignAidError::Transport(err.to_string())
    }
}
