use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Status sync error: {0}")]
    Sync(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
