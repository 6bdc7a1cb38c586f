//! Wire types for the `surveyresponse` list endpoint.

use indexmap::IndexMap;
use serde::Deserialize;
use survey_core::{Answer, QuestionAnswer, SurveyResponse};

use crate::lenient;

/// URL variable carrying the person alias GUID.
pub const PERSON_ALIAS_VARIABLE: &str = "rockpersonaliasguid";

/// Paged envelope returned by `GET /survey/{id}/surveyresponse`.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, deserialize_with = "lenient::int")]
    pub total_count: i64,
    #[serde(deserialize_with = "lenient::count")]
    pub page: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub results_per_page: i64,
    #[serde(default)]
    pub data: Vec<WireResponse>,
}

#[derive(Debug, Deserialize)]
pub struct WireResponse {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::map_or_empty")]
    pub url_variables: IndexMap<String, Option<UrlVariable>>,
    #[serde(default, deserialize_with = "lenient::map_or_empty")]
    pub survey_data: IndexMap<String, Option<WireQuestion>>,
}

#[derive(Debug, Deserialize)]
pub struct UrlVariable {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub value: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireQuestion {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub section_id: Option<String>,
    #[serde(default)]
    pub shown: bool,
    #[serde(default, deserialize_with = "lenient::map_or_empty")]
    pub options: IndexMap<String, Option<WireOption>>,
}

#[derive(Debug, Deserialize)]
pub struct WireOption {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub option: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub answer: Option<String>,
}

impl WireQuestion {
    /// Normalize into an [`Answer`].
    ///
    /// A question with any options is multiple-choice; its selected answer
    /// texts are kept in payload order, skipping null entries.
    #[must_use]
    pub fn to_answer(&self) -> Answer {
        if self.options.is_empty() {
            return Answer::Text(self.answer.clone().unwrap_or_default());
        }
        Answer::Choices(
            self.options
                .values()
                .flatten()
                .filter_map(|option| option.answer.clone())
                .collect(),
        )
    }
}

impl From<WireResponse> for SurveyResponse {
    fn from(wire: WireResponse) -> Self {
        let person_alias = wire
            .url_variables
            .get(PERSON_ALIAS_VARIABLE)
            .and_then(Option::as_ref)
            .and_then(|variable| variable.value.clone());

        let answers = wire
            .survey_data
            .values()
            .flatten()
            .map(|question| QuestionAnswer {
                question_id: question.id,
                answer: question.to_answer(),
            })
            .collect();

        Self {
            id: wire.id,
            status: wire.status,
            person_alias,
            answers,
        }
    }
}
