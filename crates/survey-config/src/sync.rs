//! Sync engine tuning.

use serde::{Deserialize, Serialize};

/// Default page cap per survey.
const fn default_max_pages_per_survey() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSection {
    /// Upper bound on pages fetched for one survey in one run.
    ///
    /// Guards against a server whose `total_pages` keeps growing.
    #[serde(default = "default_max_pages_per_survey")]
    pub max_pages_per_survey: u32,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            max_pages_per_survey: default_max_pages_per_survey(),
        }
    }
}
