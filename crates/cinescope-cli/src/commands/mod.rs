pub mod auth;
pub mod config;
pub mod feedback;
pub mod movies;
pub mod prompts;
pub mod spinner;
pub mod watchlists;

use crate::output::Output;
use cinescope_api::{ApiClient, AuthSession};
use cinescope_config::{Config, CredentialStore, PathManager};
use color_eyre::Result;
use std::sync::Arc;

/// Settings and session shared by every command that talks to the backend
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub session: Arc<AuthSession>,
}

impl AppContext {
    pub fn load(api_url: Option<&str>) -> Result<Self> {
        let paths = PathManager::default();

        let config_file = paths.config_file();
        let mut config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        if let Some(url) = api_url {
            config.api.base_url = url.to_string();
        }
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;

        let credentials_file = paths.credentials_file();
        let mut cred_store = CredentialStore::new(credentials_file.clone());
        cred_store
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        Ok(Self {
            paths,
            config,
            session: Arc::new(AuthSession::from_credentials(&cred_store)),
        })
    }

    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::from_config(&self.config.api, self.session.clone())
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))
    }

    /// Requests still go out without a token; the backend decides what to reject
    pub fn warn_if_signed_out(&self, output: &Output) {
        if !self.session.is_authenticated() {
            tracing::debug!("No session token stored");
            output.warn("Not signed in. Run 'cinescope login' to store your session token.");
        }
    }
}
