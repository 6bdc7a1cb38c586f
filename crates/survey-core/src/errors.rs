//! Cross-cutting error types.
//!
//! Errors raised by the network client and the sync engine live in their own
//! crates. This module only holds what the identity-store collaborators and
//! the domain parsers need.

use thiserror::Error;

/// Errors raised while parsing or validating domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A survey identifier could not be parsed as a positive integer.
    #[error("Malformed survey identifier: '{raw}'")]
    MalformedSurveyId { raw: String },

    /// A person alias identifier could not be parsed.
    #[error("Malformed person alias: '{raw}'")]
    MalformedAlias { raw: String },
}

/// Errors raised by a person resolver or attribute store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity lookup returned no result where one was required.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Reading or writing the backing storage failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing storage held data that could not be (de)serialized.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catch-all for backend-specific failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
