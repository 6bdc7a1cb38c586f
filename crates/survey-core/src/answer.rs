//! Normalized survey responses.
//!
//! The wire envelope returned by the survey provider is decoded in
//! `survey-client` and converted into these types, which carry only what the
//! response mapper needs: the raw person alias and the ordered answer set.

use serde::{Deserialize, Serialize};

/// Separator used when storing multiple-choice selections.
pub const CHOICE_SEPARATOR: &str = ",";

/// A single question's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Free-text answer, stored verbatim.
    Text(String),
    /// Selected option texts, in payload order.
    Choices(Vec<String>),
}

impl Answer {
    /// The value written to a person attribute.
    ///
    /// Choices are joined with [`CHOICE_SEPARATOR`]; text is returned as-is.
    #[must_use]
    pub fn display_value(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Choices(choices) => choices.join(CHOICE_SEPARATOR),
        }
    }
}

/// An answer paired with the id of the question it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question_id: i64,
    pub answer: Answer,
}

/// One respondent's submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: Option<i64>,
    pub status: String,
    /// Raw `rockpersonaliasguid` URL variable, unparsed.
    pub person_alias: Option<String>,
    /// Answers in the order the provider returned them.
    pub answers: Vec<QuestionAnswer>,
}

impl SurveyResponse {
    /// All answers whose question id matches `question_id`.
    pub fn answers_for(&self, question_id: i64) -> impl Iterator<Item = &Answer> {
        self.answers
            .iter()
            .filter(move |qa| qa.question_id > 0 && qa.question_id == question_id)
            .map(|qa| &qa.answer)
    }
}
