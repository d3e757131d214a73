//! Client error taxonomy.

use teletest_core::DecodeError;
use thiserror::Error;

/// Client error.
///
/// Nothing is retried or recovered; every failure reaches the caller as one
/// of these variants.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("Failed to decode {path} response: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: DecodeError,
    },
    /// A credential cannot be sent as an HTTP header value.
    #[error("Invalid value for header {name}: {source}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status for [`ClientError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures below HTTP: connect, reset, transport timeout.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
