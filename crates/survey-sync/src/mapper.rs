//! Applies one survey response to the respondent's person attributes.

use survey_core::{
    AttributeStore, AttributeValue, Person, PersonAliasId, PersonResolver, StoreError,
    SurveyConfig, SurveyResponse,
};

/// Why a response produced no writes. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `rockpersonaliasguid` URL variable, or it was blank.
    MissingAlias,
    /// The URL variable was present but not a GUID.
    MalformedAlias,
    /// The alias does not resolve to a local person.
    PersonNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingResult {
    Applied {
        person_id: i64,
        attributes_written: usize,
    },
    Skipped(SkipReason),
}

impl MappingResult {
    #[must_use]
    pub const fn attributes_written(&self) -> usize {
        match self {
            Self::Applied {
                attributes_written, ..
            } => *attributes_written,
            Self::Skipped(_) => 0,
        }
    }
}

/// Maps responses onto person attributes through the identity-store
/// collaborators.
#[derive(Clone, Copy)]
pub struct ResponseMapper<'a> {
    resolver: &'a dyn PersonResolver,
    store: &'a dyn AttributeStore,
}

impl<'a> ResponseMapper<'a> {
    #[must_use]
    pub const fn new(resolver: &'a dyn PersonResolver, store: &'a dyn AttributeStore) -> Self {
        Self { resolver, store }
    }

    /// Apply `response` using the survey's completion flag and question
    /// mapping.
    ///
    /// Each write is persisted before the next one starts, so an error part
    /// way through leaves earlier writes in place. Writes are absolute, so
    /// applying the same response again yields the same attribute values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if resolving the person or persisting a write
    /// fails.
    pub async fn apply(
        &self,
        response: &SurveyResponse,
        config: &SurveyConfig,
    ) -> Result<MappingResult, StoreError> {
        let alias = match parse_alias(response) {
            Ok(alias) => alias,
            Err(reason) => return Ok(MappingResult::Skipped(reason)),
        };

        let Some(person) = self.resolver.resolve_by_alias(alias).await? else {
            tracing::debug!(%alias, "no person for alias, skipping response");
            return Ok(MappingResult::Skipped(SkipReason::PersonNotFound));
        };

        let mut written = 0;

        if let Some(key) = &config.completion_attribute_key {
            self.write(&person, key, &AttributeValue::Bool(true)).await?;
            written += 1;
        }

        for entry in &config.question_mapping {
            for answer in response.answers_for(entry.question_id) {
                let value = answer.display_value();
                if value.trim().is_empty() {
                    continue;
                }
                self.write(&person, &entry.target_attribute_key, &AttributeValue::Text(value))
                    .await?;
                written += 1;
            }
        }

        Ok(MappingResult::Applied {
            person_id: person.id,
            attributes_written: written,
        })
    }

    async fn write(
        &self,
        person: &Person,
        key: &str,
        value: &AttributeValue,
    ) -> Result<(), StoreError> {
        tracing::trace!(person_id = person.id, key, %value, "setting person attribute");
        self.store.set_attribute(person, key, value).await
    }
}

fn parse_alias(response: &SurveyResponse) -> Result<PersonAliasId, SkipReason> {
    let raw = response
        .person_alias
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(SkipReason::MissingAlias)?;

    raw.parse().map_err(|_| {
        tracing::warn!(response_id = ?response.id, raw, "unparsable person alias, skipping response");
        SkipReason::MalformedAlias
    })
}
