//! Client error model.

use retailops_core::DomainError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Shown when the server did not send a usable message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong, please try again";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, broken body).
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    #[error("forbidden")]
    Forbidden { message: Option<String> },

    #[error("not found")]
    NotFound { message: Option<String> },

    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },

    /// DTO or identifier rejected before any request was sent.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// The text a transient notification should carry.
    pub fn user_message(&self) -> String {
        let server = match self {
            ClientError::Unauthorized { message }
            | ClientError::Forbidden { message }
            | ClientError::NotFound { message }
            | ClientError::Api { message, .. } => message.as_deref(),
            ClientError::Domain(DomainError::Validation(msg) | DomainError::InvalidId(msg)) => {
                Some(msg.as_str())
            }
            _ => None,
        };

        match server.map(str::trim) {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Whether a query may retry the transport once.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    pub(crate) fn storage(err: anyhow::Error) -> Self {
        ClientError::Storage(format!("{err:#}"))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
