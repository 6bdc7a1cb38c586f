//! # survey-config
//!
//! Layered configuration loading for survey result sync using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SURVEY_SYNC_*` prefix, `__` as separator)
//! 2. Project-level `.survey-sync/config.toml`
//! 3. User-level `~/.config/survey-sync/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SURVEY_SYNC_API__TOKEN` -> `api.token`,
//! `SURVEY_SYNC_API__REQUESTS_PER_MINUTE` -> `api.requests_per_minute`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use survey_config::SyncConfig;
//!
//! let config = SyncConfig::load_with_dotenv(None).expect("config");
//! if config.api.is_configured() {
//!     println!("{} surveys configured", config.surveys.len());
//! }
//! ```

mod api;
mod error;
mod store;
mod surveys;
mod sync;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use store::StoreConfig;
pub use surveys::{MappingSettings, SurveySettings};
pub use sync::SyncSection;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Directory holding project-local configuration and the person store.
pub const PROJECT_DIR: &str = ".survey-sync";

/// Built once per run and passed explicitly to every component.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sync: SyncSection,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub surveys: Vec<SurveySettings>,
}

impl SyncConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `project_root` defaults to the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if any source fails to parse or a
    /// value has the wrong type.
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(project_root).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`SyncConfig::load`].
    pub fn load_with_dotenv(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = project_root.map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load(project_root)
    }

    /// Build the figment provider chain.
    pub fn figment(project_root: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root
            .map_or_else(|| PathBuf::from(PROJECT_DIR), |p| p.join(PROJECT_DIR))
            .join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SURVEY_SYNC_").split("__"))
    }

    /// Fail unless API credentials and base URL are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `api` section.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        if self.api.is_configured() {
            Ok(&self.api)
        } else {
            Err(ConfigError::NotConfigured {
                section: String::from("api"),
            })
        }
    }

    /// Copy with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            api: self.api.redacted(),
            ..self.clone()
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("survey-sync").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = SyncConfig::default();
        assert!(!config.api.is_configured());
        assert!(config.surveys.is_empty());
        assert_eq!(config.sync.max_pages_per_survey, 1000);
    }

    #[test]
    fn require_api_reports_section() {
        let err = SyncConfig::default().require_api().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { section } if section == "api"));
    }
}
