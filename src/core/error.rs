use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid config {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// The one failure a holdings fetch can produce.
///
/// Connection errors, non-success statuses and malformed payloads all end up
/// here. The message is for logs; callers only see success or failure.
#[derive(Debug, Error)]
#[error("Failed to fetch holdings: {0}")]
pub struct FetchError(String);

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self(format!("malformed payload: {e}"))
    }
}
