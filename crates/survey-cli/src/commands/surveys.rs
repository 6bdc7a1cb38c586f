use serde::Serialize;

use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SurveyListing {
    survey_id: String,
    completion_attribute: Option<String>,
    mappings: Vec<MappingListing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct MappingListing {
    question_id: i64,
    attribute: String,
}

/// Handle `survey-sync surveys`.
pub fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let listings = ctx
        .config
        .surveys
        .iter()
        .map(listing)
        .collect::<Vec<_>>();
    output(&listings)
}

fn listing(settings: &survey_config::SurveySettings) -> SurveyListing {
    match settings.resolve() {
        Ok(config) => SurveyListing {
            survey_id: config.survey_id.to_string(),
            completion_attribute: config.completion_attribute_key,
            mappings: config
                .question_mapping
                .into_iter()
                .map(|entry| MappingListing {
                    question_id: entry.question_id,
                    attribute: entry.target_attribute_key,
                })
                .collect(),
            error: None,
        },
        Err(error) => SurveyListing {
            survey_id: settings.survey_id.clone(),
            completion_attribute: None,
            mappings: Vec::new(),
            error: Some(error.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use survey_config::{MappingSettings, SurveySettings};

    use super::listing;

    #[test]
    fn listing_shows_resolved_mapping() {
        let settings = SurveySettings {
            survey_id: " 42 ".into(),
            completion_attribute: Some("  ".into()),
            question_mapping: vec![
                MappingSettings {
                    question_id: 7,
                    attribute: "FavoriteColor".into(),
                },
                MappingSettings {
                    question_id: 0,
                    attribute: "Ignored".into(),
                },
            ],
        };

        let listed = listing(&settings);
        assert_eq!(listed.survey_id, "42");
        assert_eq!(listed.completion_attribute, None);
        assert_eq!(listed.mappings.len(), 1);
        assert_eq!(listed.mappings[0].attribute, "FavoriteColor");
        assert!(listed.error.is_none());
    }

    #[test]
    fn listing_reports_malformed_ids() {
        let settings = SurveySettings {
            survey_id: "abc".into(),
            completion_attribute: None,
            question_mapping: Vec::new(),
        };

        let listed = listing(&settings);
        assert_eq!(listed.survey_id, "abc");
        assert!(listed.error.is_some());
    }
}
