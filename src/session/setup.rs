//! Session setup and initialization

use crate::api::{ApiClient, DashboardApi};
use crate::auth::LoadContext;
use crate::config::Config;
use crate::environment::Environment;
use crate::models::Identity;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Where the config (and the session) is stored
    pub config_path: PathBuf,
    /// The environment requests go to
    pub environment: Environment,
    /// The API client, carrying the stored token if there is one
    pub api: Arc<dyn DashboardApi>,
    /// Who is signed in, if anyone
    pub identity: Option<Identity>,
}

impl SessionData {
    /// The signed-in identity, or an error telling the user to sign in.
    pub fn require_identity(&self) -> Result<Identity, Box<dyn Error>> {
        self.identity
            .clone()
            .ok_or_else(|| Box::from("Not signed in. Run `creditline login` first."))
    }

    pub fn load_context(&self) -> LoadContext {
        LoadContext::new(self.api.clone(), self.identity.clone())
    }
}

/// Resolves the environment and builds the API client from the stored session.
///
/// # Arguments
/// * `config_path` - Path of the config file. A missing file means nobody is signed in.
/// * `api_url` - Overrides both the config file and `CREDITLINE_ENVIRONMENT`.
pub fn setup_session(
    config_path: PathBuf,
    api_url: Option<String>,
) -> Result<SessionData, Box<dyn Error>> {
    let config = Config::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load config: {}", e))?;

    let environment = match api_url {
        Some(api_url) => Environment::Custom { api_url },
        None => config.environment(Environment::from_env()),
    };
    log::debug!("Using {:?}", environment);

    let (token, identity) = match config.session {
        Some(session) => (session.token, Some(session.identity)),
        None => (None, None),
    };
    let api = ApiClient::new(environment.clone())?.with_token(token);

    Ok(SessionData {
        config_path,
        environment,
        api: Arc::new(api),
        identity,
    })
}
