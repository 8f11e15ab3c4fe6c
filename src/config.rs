//! Configuration management for the Umami MCP server.
//!
//! Settings are read from the environment without validation. Empty values
//! are meaningful: they select the authentication mode, and the client's
//! preflight check reports what is missing on the first call.

use std::env;

/// Environment variable holding the Umami base URL.
pub const ENV_BASE_URL: &str = "UMAMI_URL";
/// Environment variable holding the login username.
pub const ENV_USERNAME: &str = "UMAMI_USERNAME";
/// Environment variable holding the login password.
pub const ENV_PASSWORD: &str = "UMAMI_PASSWORD";
/// Environment variable holding the API key (Umami Cloud).
pub const ENV_API_KEY: &str = "UMAMI_API_KEY";

/// Connection settings for an Umami instance.
///
/// The password and API key must never be logged or included in error
/// messages.
#[derive(Clone, Default)]
pub struct Config {
    /// Base URL without trailing slashes (e.g., `https://analytics.example.com`).
    pub base_url: String,

    /// Username for the login exchange.
    pub username: String,

    /// Password for the login exchange.
    pub password: String,

    /// API key. When non-empty it is used as the bearer credential and
    /// username/password are ignored.
    pub api_key: String,
}

impl Config {
    /// Builds a configuration from explicit values, normalizing the base URL.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: Self::normalize_base_url(&base_url.into()),
            username: username.into(),
            password: password.into(),
            api_key: api_key.into(),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// Unset variables default to the empty string. This never fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env();
    /// ```
    pub fn from_env() -> Self {
        Self::new(
            Self::get_env(ENV_BASE_URL),
            Self::get_env(ENV_USERNAME),
            Self::get_env(ENV_PASSWORD),
            Self::get_env(ENV_API_KEY),
        )
    }

    /// Returns true if an API key is configured.
    pub fn uses_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Secrets that must be scrubbed from any outward-facing message.
    pub fn secrets(&self) -> [&str; 2] {
        [self.api_key.as_str(), self.password.as_str()]
    }

    fn get_env(name: &str) -> String {
        env::var(name).unwrap_or_default()
    }

    /// Strips every trailing slash so `base_url + path` never doubles up.
    fn normalize_base_url(url: &str) -> String {
        url.trim_end_matches('/').to_string()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
