use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single call against the remote task service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("server answered {status}{}", message_suffix(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
