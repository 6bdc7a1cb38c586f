use anyhow::{Context, bail};
use serde::Serialize;
use survey_config::SurveySettings;
use survey_core::AttributeStore;
use survey_sync::{Collaborators, RunStatus, SurveySummary, SyncOutcome};
use tokio_util::sync::CancellationToken;

use crate::cli::{GlobalFlags, SyncArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::SpinnerProgress;
use crate::store::{DryRunStore, JsonPersonStore};

/// Printed after every `survey-sync sync` run.
#[derive(Debug, Serialize)]
struct SyncReport {
    #[serde(flatten)]
    status: RunStatus,
    dry_run: bool,
    surveys_processed: usize,
    responses_processed: usize,
    attributes_written: usize,
    surveys: Vec<SurveySummary>,
    errors: Vec<FailureReport>,
}

#[derive(Debug, Serialize)]
struct FailureReport {
    survey_id: String,
    message: String,
}

impl SyncReport {
    fn new(outcome: SyncOutcome, dry_run: bool) -> Self {
        Self {
            status: outcome.status,
            dry_run,
            surveys_processed: outcome.surveys_processed,
            responses_processed: outcome.responses_processed,
            attributes_written: outcome.attributes_written,
            surveys: outcome.surveys,
            errors: outcome
                .errors
                .iter()
                .map(|failure| FailureReport {
                    survey_id: failure.survey_id.clone(),
                    message: failure.message(),
                })
                .collect(),
        }
    }
}

/// Handle `survey-sync sync`.
pub async fn handle(args: &SyncArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let surveys = select_surveys(&ctx.config.surveys, &args.surveys)?;

    let people = JsonPersonStore::open(ctx.store_path())
        .await
        .with_context(|| format!("failed to open person store {}", ctx.store_path().display()))?;
    let dry_run_store = DryRunStore::default();
    let store: &dyn AttributeStore = if args.dry_run {
        &dry_run_store
    } else {
        &people
    };

    let progress = SpinnerProgress::new("Syncing surveys", !flags.quiet);
    let collaborators = Collaborators {
        resolver: &people,
        store,
        progress: &progress,
    };

    let cancel = CancellationToken::new();
    let interrupt = spawn_interrupt_listener(cancel.clone());
    let outcome = survey_sync::run(&ctx.config, &surveys, collaborators, cancel).await;
    interrupt.abort();

    if let RunStatus::NotConfigured { reason } = &outcome.status {
        progress.finish(survey_sync::NOT_CONFIGURED_MESSAGE);
        bail!("{}: {reason}", survey_sync::NOT_CONFIGURED_MESSAGE);
    }
    progress.finish(&finish_message(&outcome));
    if args.dry_run {
        tracing::info!(
            writes = dry_run_store.writes(),
            path = %people.path().display(),
            "dry run finished; person store left untouched"
        );
    }

    output(&SyncReport::new(outcome, args.dry_run))
}

/// Final spinner line, distinct from the per-survey status messages.
fn finish_message(outcome: &SyncOutcome) -> String {
    let completed = outcome.surveys_processed;
    match outcome.status {
        RunStatus::NoSurveys => String::from("Sync finished: no surveys configured"),
        RunStatus::Cancelled => format!("Sync cancelled: {completed} survey(s) completed"),
        _ if outcome.is_clean() => format!("Sync finished: {completed} survey(s) completed"),
        _ => format!(
            "Sync finished: {completed} survey(s) completed, {} failed",
            outcome.errors.len()
        ),
    }
}

/// Restrict the configured surveys to the `--survey` filters, if any.
fn select_surveys(
    configured: &[SurveySettings],
    filters: &[String],
) -> anyhow::Result<Vec<SurveySettings>> {
    if filters.is_empty() {
        return Ok(configured.to_vec());
    }

    let mut selected = Vec::with_capacity(filters.len());
    for filter in filters {
        let wanted = filter.trim();
        let Some(settings) = configured
            .iter()
            .find(|settings| settings.survey_id.trim() == wanted)
        else {
            bail!("survey '{wanted}' is not configured");
        };
        if !selected.contains(settings) {
            selected.push(settings.clone());
        }
    }
    Ok(selected)
}

fn spawn_interrupt_listener(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping before the next page");
            cancel.cancel();
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn survey(id: &str) -> SurveySettings {
        SurveySettings {
            survey_id: id.into(),
            completion_attribute: Some("Done".into()),
            question_mapping: Vec::new(),
        }
    }

    #[test]
    fn no_filter_selects_everything() {
        let configured = vec![survey("1"), survey("2")];
        let selected = select_surveys(&configured, &[]).unwrap();
        assert_eq!(selected, configured);
    }

    #[test]
    fn filters_keep_requested_order_and_drop_duplicates() {
        let configured = vec![survey("1"), survey(" 2 "), survey("3")];
        let selected =
            select_surveys(&configured, &["3".into(), "2".into(), "3".into()]).unwrap();
        assert_eq!(selected, vec![survey("3"), survey(" 2 ")]);
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let err = select_surveys(&[survey("1")], &["9".into()]).unwrap_err();
        assert!(err.to_string().contains("'9'"));
    }

    #[test]
    fn finish_message_reports_completed_surveys() {
        let mut outcome = SyncOutcome::new(RunStatus::Completed);
        outcome.surveys_processed = 2;
        assert_eq!(finish_message(&outcome), "Sync finished: 2 survey(s) completed");

        outcome.status = RunStatus::Cancelled;
        assert_eq!(finish_message(&outcome), "Sync cancelled: 2 survey(s) completed");

        outcome.status = RunStatus::NoSurveys;
        assert_eq!(finish_message(&outcome), "Sync finished: no surveys configured");
    }

    #[test]
    fn finish_message_counts_failed_surveys() {
        let mut outcome = SyncOutcome::new(RunStatus::Completed);
        outcome.surveys_processed = 1;
        outcome.errors.push(survey_sync::SurveyFailure {
            survey_id: "9".into(),
            error: survey_sync::SyncError::PageLimit { limit: 5 },
        });
        assert_eq!(
            finish_message(&outcome),
            "Sync finished: 1 survey(s) completed, 1 failed"
        );
    }

    #[test]
    fn report_flattens_status() {
        let report = SyncReport::new(SyncOutcome::new(RunStatus::NoSurveys), true);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "no_surveys");
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["errors"], serde_json::json!([]));
    }
}
