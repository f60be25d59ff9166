//! Sign-in, sign-out and the authentication context handed to data loaders.

use crate::api::{DashboardApi, fallback};
use crate::config::{Config, Session};
use crate::models::{Identity, Role};
use crate::pretty::{handle_cmd_error, print_cmd_error, print_cmd_info};
use std::path::Path;
use std::sync::Arc;

/// What a loader needs to fetch: the API, and who is signed in.
///
/// Loaders only fetch when an identity is present, so an anonymous context turns every
/// activation and refresh into a no-op.
#[derive(Clone)]
pub struct LoadContext {
    api: Arc<dyn DashboardApi>,
    identity: Option<Identity>,
}

impl LoadContext {
    pub fn new(api: Arc<dyn DashboardApi>, identity: Option<Identity>) -> Self {
        Self { api, identity }
    }

    pub fn api(&self) -> &Arc<dyn DashboardApi> {
        &self.api
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Signs in and stores the session in the config file.
///
/// # Arguments
/// * `email` - The account's email address.
/// * `password` - The account's password.
/// * `config_path` - Where the session is persisted.
/// * `api` - The API client to authenticate against.
pub async fn login(
    email: &str,
    password: &str,
    config_path: &Path,
    api: &dyn DashboardApi,
) -> Result<Identity, Box<dyn std::error::Error>> {
    if !is_plausible_email(email) {
        print_cmd_error!("❌ Invalid email address.");
        return Err(Box::from(format!("Invalid email address: {}", email)));
    }
    if password.is_empty() {
        print_cmd_error!("❌ Password is required.");
        return Err(Box::from("Password is required"));
    }

    let response = match api.login(email, password).await {
        Ok(response) => response,
        Err(e) => {
            let message = e.display_message(fallback::LOGIN);
            log::warn!("Login failed: {}", e);
            print_cmd_error!(message);
            return Err(Box::from(message));
        }
    };

    let mut config = Config::load_or_default(config_path)
        .map_err(|e| handle_cmd_error!(e, "Failed to read config."))?;
    config.session = Some(Session {
        token: response.token,
        identity: response.user.clone(),
    });
    config
        .save(config_path)
        .map_err(|e| handle_cmd_error!(e, "Failed to save config."))?;

    print_cmd_info!(
        "✅ Signed in.",
        "{} ({})",
        response
            .user
            .business_name
            .as_deref()
            .unwrap_or(&response.user.email),
        response.user.role
    );
    Ok(response.user)
}

/// Ends the session on the server, if there is one, and forgets it locally.
///
/// The local session is cleared even if the server cannot be reached.
pub async fn logout(
    config_path: &Path,
    api: &dyn DashboardApi,
) -> Result<(), Box<dyn std::error::Error>> {
    let has_token = Config::load_or_default(config_path)
        .ok()
        .and_then(|c| c.session)
        .is_some_and(|s| s.token.is_some());

    if has_token {
        if let Err(e) = api.logout().await {
            log::warn!("Server-side logout failed: {}", e);
            print_cmd_info!(
                "Could not reach the server to end the session.",
                "{}",
                e.display_message(fallback::LOGOUT)
            );
        }
    }

    Config::clear_session(config_path)
        .map_err(|e| handle_cmd_error!(e, "Failed to clear session."))?;
    print_cmd_info!("Signed out.");
    Ok(())
}
