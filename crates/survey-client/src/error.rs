//! Survey API error types.

use thiserror::Error;

/// Errors that can occur when talking to the survey provider.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider returned a non-success status code.
    #[error("API error ({status}): {description}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Reason phrase or response body.
        description: String,
    },

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body was not a valid page envelope.
    #[error("failed to decode survey response page: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot be turned into a request URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// HTTP status code, if the provider answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}
