//! Errors raised while loading survey-sync settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the settings shape.
    #[error("failed to load survey-sync settings: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed for the requested operation is missing fields.
    #[error("settings section '{section}' is incomplete")]
    NotConfigured { section: String },
}
