//! Error types for the sync operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the HTTP transport itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Token could not be used as a header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors returned when fetching the workflow status document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("Failed to fetch workflow: server returned {0}")]
    Status(StatusCode),

    /// The server answered successfully but sent nothing
    #[error("Empty response")]
    EmptyBody,

    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors returned when triggering a repository dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The configured repository is not of the form `owner/repo`
    #[error("Invalid repository '{0}', expected owner/repo")]
    MalformedSettings(String),

    /// GitHub answered with a non-success status
    #[error("Failed to trigger: {}", .0.as_u16())]
    Status(StatusCode),

    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl DispatchError {
    /// HTTP status code observed for this failure, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(status) => Some(status.as_u16()),
            Self::MalformedSettings(_) | Self::Transport(_) => None,
        }
    }
}
