//! Configured surveys and their question mapping matrices.

use serde::{Deserialize, Serialize};
use survey_core::{CoreError, MatrixEntry, SurveyConfig};

/// One question mapping row as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappingSettings {
    /// Provider question id. Rows with a non-positive id are ignored.
    pub question_id: i64,
    /// Person attribute key that receives the answer.
    pub attribute: String,
}

/// A survey entry as it appears in configuration.
///
/// The identifier stays a string here so a single malformed entry can be
/// reported and skipped at sync time instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SurveySettings {
    pub survey_id: String,

    /// Person attribute set to `True` for every respondent.
    #[serde(default)]
    pub completion_attribute: Option<String>,

    #[serde(default)]
    pub question_mapping: Vec<MappingSettings>,
}

impl SurveySettings {
    /// Resolve into the immutable per-run [`SurveyConfig`].
    ///
    /// Blank completion keys are treated as unset. Mapping rows missing
    /// either side are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedSurveyId`] if `survey_id` is not a
    /// positive integer.
    pub fn resolve(&self) -> Result<SurveyConfig, CoreError> {
        let survey_id = SurveyConfig::parse_survey_id(&self.survey_id)?;

        let completion_attribute_key = self
            .completion_attribute
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        let question_mapping = self
            .question_mapping
            .iter()
            .filter_map(|row| {
                let entry = MatrixEntry::new(row.question_id, &row.attribute);
                if entry.is_none() {
                    tracing::debug!(
                        survey_id,
                        question_id = row.question_id,
                        attribute = %row.attribute,
                        "ignoring incomplete question mapping row"
                    );
                }
                entry
            })
            .collect();

        Ok(SurveyConfig {
            survey_id,
            completion_attribute_key,
            question_mapping,
        })
    }
}
