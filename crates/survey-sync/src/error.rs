//! Sync engine error types.

use survey_client::ClientError;
use survey_config::ConfigError;
use survey_core::{CoreError, StoreError};
use thiserror::Error;

/// Errors raised while syncing.
///
/// Everything except [`SyncError::Configuration`] is caught at the
/// per-survey boundary and recorded in the run outcome.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Credentials or endpoint missing or unusable. Aborts the whole run.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The configured survey identifier is not a positive integer.
    #[error("malformed survey identifier '{raw}'")]
    MalformedIdentifier { raw: String },

    /// Fetching a page failed (network, non-success status, or bad body).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Resolving a person or writing an attribute failed.
    #[error("attribute store error: {0}")]
    Store(#[from] StoreError),

    /// The per-survey page cap was hit before the server ran out of pages.
    #[error("page limit of {limit} reached before the last page")]
    PageLimit { limit: u32 },

    /// An external shutdown signal interrupted the run between pages.
    #[error("sync cancelled")]
    Cancelled,
}

impl From<CoreError> for SyncError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MalformedSurveyId { raw } => Self::MalformedIdentifier { raw },
            error @ CoreError::MalformedAlias { .. } => {
                Self::Store(StoreError::Other(error.into()))
            }
        }
    }
}

impl SyncError {
    /// Network-level failure reaching the API.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Client(ClientError::Transport(_)))
    }

    /// HTTP status of a non-success API response.
    #[must_use]
    pub const fn api_status(&self) -> Option<u16> {
        match self {
            Self::Client(error) => error.status(),
            _ => None,
        }
    }
}
