// Client configuration
// Replaces the page-global API base and hard-coded delays with one explicit object

use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

/// Everything a controller needs to know about where the backend lives
/// and how long UI side effects last.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme + host + port, no trailing slash (e.g. `http://localhost:5000`)
    pub base_url: String,
    /// Prefix for the JSON API routes
    pub api_prefix: String,
    pub request_timeout: Duration,
    pub alert_timeout: Duration,
    pub login_redirect_delay: Duration,
    pub register_redirect_delay: Duration,
    /// How many pantry names the dashboard overview shows
    pub overview_limit: usize,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            api_prefix: "/api".to_string(),
            request_timeout: Duration::from_secs(30),
            alert_timeout: Duration::from_secs(5),
            login_redirect_delay: Duration::from_secs(1),
            register_redirect_delay: Duration::from_secs(2),
            overview_limit: 8,
            username: None,
            password: None,
        }
    }
}

impl ClientConfig {
    /// Build a config from `MEALPLAN_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn load() -> Self {
        let defaults = Self::default();

        let base_url: String = try_load("MEALPLAN_BASE_URL", defaults.base_url.clone());
        let timeout_secs: u64 =
            try_load("MEALPLAN_TIMEOUT_SECS", defaults.request_timeout.as_secs());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
            username: env::var("MEALPLAN_USERNAME").ok(),
            password: env::var("MEALPLAN_PASSWORD").ok(),
            ..defaults
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for a page or API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Path of an API route, e.g. `api_path("/pantry/ingredients")`.
    pub fn api_path(&self, route: &str) -> String {
        format!("{}{}", self.api_prefix, route)
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value: {e}, using default: {default}");
            default
        }),
        Err(()) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
