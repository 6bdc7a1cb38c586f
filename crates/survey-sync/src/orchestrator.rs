//! Drives pagination across all configured surveys.
//!
//! Per survey the loop is `fetch page 1 → apply responses → (more pages?
//! wait → fetch next) | done`. The server's `total_pages` is re-read from
//! every page. Any failure ends that survey only; writes already made stay,
//! and the next survey is attempted.

use survey_client::{Lookback, SurveyPage};
use survey_config::{ApiConfig, SurveySettings, SyncSection};
use survey_core::{AttributeStore, PersonResolver, ProgressSink, SurveyConfig};
use tokio_util::sync::CancellationToken;

use crate::error::SyncError;
use crate::mapper::{MappingResult, ResponseMapper};
use crate::outcome::{RunStatus, SurveySummary, SyncOutcome};
use crate::rate_limit::RateLimiter;
use crate::source::PageSource;

/// Per-run knobs, fixed when the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub requests_per_minute: u32,
    pub lookback: Lookback,
    pub max_pages_per_survey: u32,
}

impl RunSettings {
    /// Settings for a run starting now, using today's local date.
    #[must_use]
    pub fn from_config(api: &ApiConfig, sync: &SyncSection) -> Self {
        Self {
            requests_per_minute: api.effective_requests_per_minute(),
            lookback: Lookback::from_local_today(api.days_back),
            max_pages_per_survey: sync.max_pages_per_survey,
        }
    }
}

/// Borrowed host collaborators.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub resolver: &'a dyn PersonResolver,
    pub store: &'a dyn AttributeStore,
    pub progress: &'a dyn ProgressSink,
}

pub struct SyncOrchestrator<'a> {
    source: &'a dyn PageSource,
    mapper: ResponseMapper<'a>,
    progress: &'a dyn ProgressSink,
    limiter: RateLimiter,
    settings: RunSettings,
    cancel: CancellationToken,
}

impl<'a> SyncOrchestrator<'a> {
    #[must_use]
    pub fn new(
        source: &'a dyn PageSource,
        collaborators: Collaborators<'a>,
        settings: RunSettings,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            mapper: ResponseMapper::new(collaborators.resolver, collaborators.store),
            progress: collaborators.progress,
            limiter: RateLimiter::per_minute(settings.requests_per_minute),
            settings,
            cancel,
        }
    }

    /// Sync every configured survey in order.
    ///
    /// Never fails: per-survey problems are recorded in the outcome and the
    /// run moves on to the next survey.
    pub async fn run_sync(&mut self, surveys: &[SurveySettings]) -> SyncOutcome {
        if surveys.is_empty() {
            self.progress.report("No surveys to sync");
            return SyncOutcome::new(RunStatus::NoSurveys);
        }

        let mut outcome = SyncOutcome::new(RunStatus::Completed);

        for settings in surveys {
            let config = match settings.resolve() {
                Ok(config) => config,
                Err(error) => {
                    tracing::warn!(survey_id = %settings.survey_id, %error, "skipping survey");
                    self.progress.report(&format!(
                        "Survey could not be synced. Survey: {}",
                        settings.survey_id
                    ));
                    outcome.record_failure(settings.survey_id.clone(), error.into());
                    continue;
                }
            };

            if !config.has_writes() {
                tracing::warn!(
                    survey_id = config.survey_id,
                    "no completion attribute or question mapping, responses will only be counted"
                );
            }

            let mut summary = SurveySummary::new(config.survey_id);
            let result = self.sync_survey(&config, &mut summary).await;
            let responses = summary.responses_processed;
            outcome.absorb(summary);

            match result {
                Ok(()) => {
                    tracing::info!(
                        survey_id = config.survey_id,
                        responses,
                        rate_limit_waits = self.limiter.waits(),
                        "survey synced"
                    );
                    self.progress
                        .report(&format!("Total surveys processed: {responses}"));
                }
                Err(SyncError::Cancelled) => {
                    tracing::warn!(survey_id = config.survey_id, "sync cancelled between pages");
                    outcome.status = RunStatus::Cancelled;
                    break;
                }
                Err(error) => {
                    tracing::warn!(
                        survey_id = config.survey_id,
                        %error,
                        status = ?error.api_status(),
                        transport = error.is_transport(),
                        "survey sync aborted"
                    );
                    self.progress.report(&format!(
                        "Survey could not be synced. Survey: {}: {error}",
                        config.survey_id
                    ));
                    outcome.record_failure(config.survey_id.to_string(), error);
                }
            }
        }

        outcome
    }

    #[tracing::instrument(level = "debug", skip_all, fields(survey_id = config.survey_id))]
    async fn sync_survey(
        &mut self,
        config: &SurveyConfig,
        summary: &mut SurveySummary,
    ) -> Result<(), SyncError> {
        let max_pages = self.settings.max_pages_per_survey.max(1);
        let mut next_page = 1u32;

        loop {
            if summary.pages_fetched >= max_pages {
                return Err(SyncError::PageLimit { limit: max_pages });
            }

            self.limiter.wait_for_slot(&self.cancel).await?;
            let page = self
                .source
                .fetch_page(config.survey_id, next_page, &self.settings.lookback)
                .await?;
            summary.pages_fetched += 1;

            self.apply_page(&page, config, summary).await?;

            // The cursor must strictly increase even if the server echoes an
            // older page number.
            next_page = page.page_number.max(next_page).saturating_add(1);
            tracing::debug!(
                page = page.page_number,
                total_pages = page.total_pages,
                next_page,
                "page applied"
            );
            if next_page > page.total_pages {
                summary.completed = true;
                return Ok(());
            }
        }
    }

    async fn apply_page(
        &self,
        page: &SurveyPage,
        config: &SurveyConfig,
        summary: &mut SurveySummary,
    ) -> Result<(), SyncError> {
        for response in &page.responses {
            let result = self.mapper.apply(response, config).await?;
            summary.attributes_written += result.attributes_written();
            if let MappingResult::Skipped(reason) = result {
                tracing::trace!(?reason, response_id = ?response.id, "response skipped");
                summary.responses_skipped += 1;
            }
            summary.responses_processed += 1;
            self.progress.report(&format!(
                "Survey responses processed: {}",
                summary.responses_processed
            ));
        }
        Ok(())
    }
}
