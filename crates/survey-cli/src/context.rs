use std::path::PathBuf;

use survey_config::SyncConfig;

/// Configuration and paths shared by every command.
#[derive(Debug)]
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: SyncConfig,
}

impl AppContext {
    pub fn load(project_root: PathBuf) -> anyhow::Result<Self> {
        let config = SyncConfig::load_with_dotenv(Some(&project_root))?;
        if !config.api.is_configured() {
            tracing::warn!("api.token / api.token_secret / api.base_url are not all set");
        }
        Ok(Self {
            project_root,
            config,
        })
    }

    /// Person store path, relative paths resolved against the project root.
    pub fn store_path(&self) -> PathBuf {
        if self.config.store.path.is_absolute() {
            self.config.store.path.clone()
        } else {
            self.project_root.join(&self.config.store.path)
        }
    }
}
