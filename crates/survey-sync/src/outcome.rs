//! Per-run bookkeeping.

use serde::Serialize;

use crate::error::SyncError;

/// How the run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// Every configured survey was attempted.
    Completed,
    /// Nothing was configured; no network activity happened.
    NoSurveys,
    /// Credentials or endpoint missing; no network activity happened.
    NotConfigured { reason: String },
    /// Interrupted between pages; counts reflect work done so far.
    Cancelled,
}

/// A survey whose sync stopped early.
#[derive(Debug)]
pub struct SurveyFailure {
    /// Identifier as configured, which may be unparsable.
    pub survey_id: String,
    pub error: SyncError,
}

impl SurveyFailure {
    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Counters for one survey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurveySummary {
    pub survey_id: u64,
    pub pages_fetched: u32,
    /// Responses iterated, including skipped ones.
    pub responses_processed: usize,
    pub responses_skipped: usize,
    pub attributes_written: usize,
    pub completed: bool,
}

impl SurveySummary {
    #[must_use]
    pub fn new(survey_id: u64) -> Self {
        Self {
            survey_id,
            ..Self::default()
        }
    }
}

/// Result of a sync run. Always returned, never thrown.
#[derive(Debug)]
pub struct SyncOutcome {
    pub status: RunStatus,
    /// Surveys whose pagination ran to the last page.
    pub surveys_processed: usize,
    /// Responses iterated across all surveys, including skipped ones.
    pub responses_processed: usize,
    pub attributes_written: usize,
    pub surveys: Vec<SurveySummary>,
    pub errors: Vec<SurveyFailure>,
}

impl SyncOutcome {
    #[must_use]
    pub const fn new(status: RunStatus) -> Self {
        Self {
            status,
            surveys_processed: 0,
            responses_processed: 0,
            attributes_written: 0,
            surveys: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn not_configured(reason: impl Into<String>) -> Self {
        Self::new(RunStatus::NotConfigured {
            reason: reason.into(),
        })
    }

    pub(crate) fn record_failure(&mut self, survey_id: impl Into<String>, error: SyncError) {
        self.errors.push(SurveyFailure {
            survey_id: survey_id.into(),
            error,
        });
    }

    /// Fold a finished survey's counters into the run totals.
    pub(crate) fn absorb(&mut self, summary: SurveySummary) {
        if summary.completed {
            self.surveys_processed += 1;
        }
        self.responses_processed += summary.responses_processed;
        self.attributes_written += summary.attributes_written;
        self.surveys.push(summary);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.status == RunStatus::Completed
    }
}
