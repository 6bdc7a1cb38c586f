//! Seam between the orchestrator and the survey API.

use async_trait::async_trait;
use survey_client::{ClientError, Lookback, SurveyApiClient, SurveyPage};

/// Anything that can hand out pages of completed survey responses.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(
        &self,
        survey_id: u64,
        page: u32,
        lookback: &Lookback,
    ) -> Result<SurveyPage, ClientError>;
}

#[async_trait]
impl PageSource for SurveyApiClient {
    async fn fetch_page(
        &self,
        survey_id: u64,
        page: u32,
        lookback: &Lookback,
    ) -> Result<SurveyPage, ClientError> {
        Self::fetch_page(self, survey_id, page, lookback).await
    }
}
