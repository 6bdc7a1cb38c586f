//! Survey provider API configuration.

use serde::{Deserialize, Serialize};

/// Default provider endpoint.
fn default_base_url() -> String {
    String::from("https://api.alchemer.com/v5/")
}

/// Default request budget per minute.
const fn default_requests_per_minute() -> i64 {
    30
}

/// Default lookback window in days.
const fn default_days_back() -> u32 {
    2
}

/// Default HTTP timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Value of the `api_token` query parameter.
    #[serde(default)]
    pub token: String,

    /// Value of the `api_token_secret` query parameter.
    #[serde(default)]
    pub token_secret: String,

    /// API root, e.g. `https://api.alchemer.com/v5/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request ceiling. Values below 1 are treated as 1.
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: i64,

    /// Only responses submitted on or after `today - days_back` are fetched.
    #[serde(default = "default_days_back")]
    pub days_back: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            token_secret: String::new(),
            base_url: default_base_url(),
            requests_per_minute: default_requests_per_minute(),
            days_back: default_days_back(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Check if credentials and an endpoint are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
            && !self.token_secret.trim().is_empty()
            && !self.trimmed_base_url().is_empty()
    }

    /// Base URL without trailing slashes.
    #[must_use]
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Request ceiling clamped to at least one request per minute.
    #[must_use]
    pub fn effective_requests_per_minute(&self) -> u32 {
        u32::try_from(self.requests_per_minute.max(1)).unwrap_or(u32::MAX)
    }

    /// Copy with credentials masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            token: mask(&self.token),
            token_secret: mask(&self.token_secret),
            ..self.clone()
        }
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        String::from("********")
    }
}
