use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the different deployment environments available for the CLI.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development backend.
    Local,
    /// Staging backend for pre-production testing.
    Staging,
    /// Production backend.
    #[default]
    Production,
    /// A backend at an explicit URL, e.g. from `--api-url` or the config file.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the REST API base URL associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000/api".to_string(),
            Environment::Staging => "https://staging.api.creditline.in/api".to_string(),
            Environment::Production => "https://api.creditline.in/api".to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }

    /// Reads `CREDITLINE_ENVIRONMENT`, falling back to the default environment.
    pub fn from_env() -> Self {
        std::env::var("CREDITLINE_ENVIRONMENT")
            .unwrap_or_default()
            .parse::<Environment>()
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
