//! Per-survey sync settings.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One row of the question mapping matrix: answers to `question_id` are
/// written to the person attribute `target_attribute_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub question_id: i64,
    pub target_attribute_key: String,
}

impl MatrixEntry {
    /// Build an entry, dropping rows that cannot match anything.
    ///
    /// Question ids must be positive and the attribute key non-blank.
    #[must_use]
    pub fn new(question_id: i64, target_attribute_key: &str) -> Option<Self> {
        let key = target_attribute_key.trim();
        if question_id <= 0 || key.is_empty() {
            return None;
        }
        Some(Self {
            question_id,
            target_attribute_key: key.to_string(),
        })
    }
}

/// Resolved settings for syncing a single survey.
///
/// Immutable for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Provider-assigned survey id.
    pub survey_id: u64,
    /// Person attribute set to `True` for every respondent.
    pub completion_attribute_key: Option<String>,
    /// Question to attribute bindings. Empty means no answer mapping.
    #[serde(default)]
    pub question_mapping: Vec<MatrixEntry>,
}

impl SurveyConfig {
    /// Parse a configured survey identifier.
    ///
    /// Surrounding whitespace is ignored. Zero, negative, and non-numeric
    /// values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedSurveyId`] if `raw` is not a positive integer.
    pub fn parse_survey_id(raw: &str) -> Result<u64, CoreError> {
        match raw.trim().parse::<u64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(CoreError::MalformedSurveyId {
                raw: raw.to_string(),
            }),
        }
    }

    /// Whether any per-response writes are configured at all.
    #[must_use]
    pub fn has_writes(&self) -> bool {
        self.completion_attribute_key.is_some() || !self.question_mapping.is_empty()
    }
}
