//! # survey-client
//!
//! HTTP client for the survey provider's `surveyresponse` list endpoint.
//!
//! Each call to [`SurveyApiClient::fetch_page`] builds its own request URL
//! with the fixed completion/alias/date filters and decodes one page of the
//! paged envelope into normalized [`SurveyResponse`]s.

mod error;
mod http;
pub mod lenient;
pub mod wire;

pub use error::ClientError;

use std::time::Duration;

use chrono::{Days, NaiveDate};
use reqwest::Url;
use survey_config::ApiConfig;
use survey_core::SurveyResponse;

use crate::http::check_response;
use crate::wire::{PERSON_ALIAS_VARIABLE, ResponseEnvelope};

/// Responses requested per page.
pub const RESULTS_PER_PAGE: u32 = 30;

// ── Types ──────────────────────────────────────────────────────────

/// Submission-date window, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback {
    /// Local calendar date the run started on.
    pub today: NaiveDate,
    pub days_back: u32,
}

impl Lookback {
    #[must_use]
    pub const fn new(today: NaiveDate, days_back: u32) -> Self {
        Self { today, days_back }
    }

    /// Window starting today's local date.
    #[must_use]
    pub fn from_local_today(days_back: u32) -> Self {
        Self::new(chrono::Local::now().date_naive(), days_back)
    }

    /// Earliest submission date included.
    #[must_use]
    pub fn since(&self) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(u64::from(self.days_back)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// [`Lookback::since`] formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn since_param(&self) -> String {
        self.since().format("%Y-%m-%d").to_string()
    }
}

/// One decoded page of survey responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyPage {
    /// Page number reported by the server.
    pub page_number: u32,
    /// Page count reported by the server on this page.
    pub total_pages: u32,
    pub total_count: i64,
    pub responses: Vec<SurveyResponse>,
}

impl From<ResponseEnvelope> for SurveyPage {
    fn from(envelope: ResponseEnvelope) -> Self {
        Self {
            page_number: envelope.page,
            total_pages: envelope.total_pages,
            total_count: envelope.total_count,
            responses: envelope.data.into_iter().map(SurveyResponse::from).collect(),
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for listing completed survey responses.
pub struct SurveyApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    token_secret: String,
}

impl std::fmt::Debug for SurveyApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SurveyApiClient {
    /// Create a client from API settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the base URL does not
    /// parse, or [`ClientError::Transport`] if the HTTP client fails to build.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let base_url = config.trimmed_base_url().to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("survey-sync/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: config.token.clone(),
            token_secret: config.token_secret.clone(),
        })
    }

    /// Build the request URL for one page.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the joined URL does not parse.
    pub fn page_url(
        &self,
        survey_id: u64,
        page: u32,
        lookback: &Lookback,
    ) -> Result<Url, ClientError> {
        let raw = format!("{}/survey/{survey_id}/surveyresponse", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        let alias_field = format!("[url(\"{PERSON_ALIAS_VARIABLE}\")]");
        let since = lookback.since_param();
        url.query_pairs_mut()
            .append_pair("api_token", &self.token)
            .append_pair("api_token_secret", &self.token_secret)
            .append_pair("page", &page.to_string())
            .append_pair("resultsperpage", &RESULTS_PER_PAGE.to_string())
            // completed responses only
            .append_pair("filter[field][0]", "status")
            .append_pair("filter[operator][0]", "=")
            .append_pair("filter[value][0]", "complete")
            // linked to a person alias
            .append_pair("filter[field][1]", &alias_field)
            .append_pair("filter[operator][1]", "IS NOT NULL")
            // submitted inside the lookback window
            .append_pair("filter[field][2]", "date_submitted")
            .append_pair("filter[operator][2]", ">=")
            .append_pair("filter[value][2]", &since);

        Ok(url)
    }

    /// Fetch one page of completed responses for `survey_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on network failure,
    /// [`ClientError::Api`] / [`ClientError::RateLimited`] on a non-success
    /// status, and [`ClientError::Decode`] if the body is not a page envelope.
    #[tracing::instrument(level = "debug", skip(self, lookback), fields(since = %lookback.since()))]
    pub async fn fetch_page(
        &self,
        survey_id: u64,
        page: u32,
        lookback: &Lookback,
    ) -> Result<SurveyPage, ClientError> {
        let url = self.page_url(survey_id, page, lookback)?;
        let resp = check_response(self.http.get(url).send().await?).await?;

        let body = resp.text().await?;
        let envelope: ResponseEnvelope = serde_json::from_str(&body)?;
        tracing::debug!(
            survey_id,
            page = envelope.page,
            total_pages = envelope.total_pages,
            responses = envelope.data.len(),
            "fetched survey response page"
        );
        Ok(SurveyPage::from(envelope))
    }
}
