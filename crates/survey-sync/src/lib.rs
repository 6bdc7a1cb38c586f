//! # survey-sync
//!
//! Paginated, rate-limited sync of completed survey responses into person
//! attributes.
//!
//! - [`RateLimiter`] spaces requests to a requests-per-minute budget
//! - [`ResponseMapper`] turns one response into attribute writes
//! - [`SyncOrchestrator`] walks every configured survey page by page
//!
//! [`run`] is the entry point used by the binary: it validates configuration,
//! builds the HTTP client, and drives one full run.

mod error;
pub mod mapper;
pub mod orchestrator;
pub mod outcome;
pub mod rate_limit;
pub mod source;

#[cfg(test)]
mod test_support;

pub use error::SyncError;
pub use mapper::{MappingResult, ResponseMapper, SkipReason};
pub use orchestrator::{Collaborators, RunSettings, SyncOrchestrator};
pub use outcome::{RunStatus, SurveyFailure, SurveySummary, SyncOutcome};
pub use rate_limit::RateLimiter;
pub use source::PageSource;

use survey_client::SurveyApiClient;
use survey_config::SyncConfig;
use tokio_util::sync::CancellationToken;

/// Message reported when credentials or the endpoint are missing.
pub const NOT_CONFIGURED_MESSAGE: &str = "API key is not configured properly.";

/// Run one sync over `surveys` using the API settings in `config`.
///
/// Returns immediately with a [`RunStatus::NotConfigured`] outcome, and no
/// network activity, if credentials or the base URL are missing or unusable.
pub async fn run(
    config: &SyncConfig,
    surveys: &[survey_config::SurveySettings],
    collaborators: Collaborators<'_>,
    cancel: CancellationToken,
) -> SyncOutcome {
    let api = match config.require_api() {
        Ok(api) => api,
        Err(error) => {
            tracing::error!(%error, "survey sync is not configured");
            collaborators.progress.report(NOT_CONFIGURED_MESSAGE);
            return SyncOutcome::not_configured(SyncError::from(error).to_string());
        }
    };

    let client = match SurveyApiClient::from_config(api) {
        Ok(client) => client,
        Err(error) => {
            tracing::error!(%error, "survey API client could not be created");
            collaborators.progress.report(NOT_CONFIGURED_MESSAGE);
            return SyncOutcome::not_configured(error.to_string());
        }
    };

    let settings = RunSettings::from_config(api, &config.sync);
    tracing::info!(
        surveys = surveys.len(),
        requests_per_minute = settings.requests_per_minute,
        since = %settings.lookback.since(),
        "starting survey sync"
    );

    let mut orchestrator = SyncOrchestrator::new(&client, collaborators, settings, cancel);
    orchestrator.run_sync(surveys).await
}

#[cfg(test)]
mod tests {
    use survey_core::NullProgress;

    use super::*;
    use crate::test_support::{MemoryDirectory, RecordingProgress};

    #[tokio::test]
    async fn missing_credentials_short_circuit() {
        let directory = MemoryDirectory::default();
        let progress = RecordingProgress::default();
        let collaborators = Collaborators {
            resolver: &directory,
            store: &directory,
            progress: &progress,
        };
        let config = SyncConfig::default();

        let outcome = run(&config, &config.surveys, collaborators, CancellationToken::new()).await;

        assert!(matches!(outcome.status, RunStatus::NotConfigured { .. }));
        assert_eq!(progress.messages(), vec![NOT_CONFIGURED_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn unusable_base_url_is_a_configuration_problem() {
        let directory = MemoryDirectory::default();
        let collaborators = Collaborators {
            resolver: &directory,
            store: &directory,
            progress: &NullProgress,
        };
        let mut config = SyncConfig::default();
        config.api.token = "tok".into();
        config.api.token_secret = "sec".into();
        config.api.base_url = "api.example.test".into();

        let outcome = run(&config, &config.surveys, collaborators, CancellationToken::new()).await;

        match outcome.status {
            RunStatus::NotConfigured { reason } => assert!(reason.contains("invalid base URL")),
            other => panic!("unexpected status: {other:?}"),
        }
    }
}
