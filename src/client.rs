//! HTTP client for the Umami API.
//!
//! This module provides `UmamiClient`, the single dispatch path used by
//! every tool, resource and prompt. It is endpoint-agnostic: callers pass a
//! method, a path, an optional JSON body and optional query parameters.
//!
//! # Authentication
//!
//! Two modes, selected by configuration:
//! - **API key**: the key is sent as the bearer credential on every request.
//! - **Username/password**: a token is obtained from `/api/auth/login`,
//!   cached, and reused until five minutes before it expires.
//!
//! No request is ever retried.
//!
//! # Security
//!
//! The API key, password and login token are never logged.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde_json::{json, Value};
use url::Url;

use crate::config::Config;
use crate::credentials::{Clock, CredentialCache, SystemClock, TokenExpiry};
use crate::error::UmamiError;
use crate::models::{LoginRequest, LoginResponse};
use crate::query::QueryParams;

/// Request timeout in seconds, applied to login and API requests alike.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the login endpoint, relative to the base URL.
const LOGIN_PATH: &str = "/api/auth/login";

/// HTTP client for the Umami API.
///
/// Cloning is cheap; clones share the HTTP connection pool and the token
/// cache.
///
/// # Example
///
/// ```ignore
/// let client = UmamiClient::new(Config::from_env())?;
/// let websites = client.get("/api/websites", None).await?;
/// ```
#[derive(Clone)]
pub struct UmamiClient {
    /// The underlying HTTP client.
    http: Client,

    /// Connection settings.
    /// SECURITY: contains the password and API key. Never log this value!
    config: Arc<Config>,

    /// Login token cache, only touched in password mode.
    credentials: Arc<CredentialCache>,

    /// Time source for token expiry decisions.
    clock: Arc<dyn Clock>,
}

impl UmamiClient {
    /// Creates a new client using the wall clock.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: Config) -> Result<Self, UmamiError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new client with an explicit time source.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError::HttpClient` if the HTTP client fails to initialize.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self, UmamiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(UmamiError::HttpClient)?;

        Ok(Self {
            http,
            config: Arc::new(config),
            credentials: Arc::new(CredentialCache::new()),
            clock,
        })
    }

    /// Current time according to the client's clock, in epoch milliseconds.
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Secrets to scrub from error messages before they leave the process.
    ///
    /// This should ONLY be used for sanitizing, never for logging.
    pub(crate) fn secrets(&self) -> [&str; 2] {
        self.config.secrets()
    }

    /// Checks that enough configuration is present to make a call.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError::Config` if the base URL is empty, or if there is
    /// no API key and the username or password is empty.
    pub fn preflight(&self) -> Result<(), UmamiError> {
        if self.config.base_url.is_empty() {
            return Err(UmamiError::config(
                "UMAMI_URL is not configured. Set it in your environment variables.",
            ));
        }
        if self.config.api_key.is_empty()
            && (self.config.username.is_empty() || self.config.password.is_empty())
        {
            return Err(UmamiError::config(
                "Authentication not configured. Set UMAMI_API_KEY or both UMAMI_USERNAME and UMAMI_PASSWORD.",
            ));
        }
        Ok(())
    }

    /// Calls an Umami API endpoint.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - Endpoint path starting with `/` (e.g., "/api/websites")
    /// * `body` - Optional JSON body; sent with `Content-Type: application/json`
    /// * `query` - Optional query parameters; absent and empty values are dropped
    ///
    /// # Returns
    ///
    /// The parsed JSON body for JSON responses, the text verbatim (as a JSON
    /// string) for non-empty text responses, and `{"success": true}` for
    /// empty responses.
    ///
    /// # Errors
    ///
    /// - `UmamiError::Config` when preflight fails (no network activity)
    /// - `UmamiError::Authentication` when the login exchange is rejected
    /// - `UmamiError::Api` when the endpoint returns a non-success status
    /// - `UmamiError::Http` on transport failure or timeout
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&QueryParams>,
    ) -> Result<Value, UmamiError> {
        self.preflight()?;

        let credential = self.bearer_credential().await?;
        let url = build_url(&self.config.base_url, path, query)?;

        tracing::debug!(method = %method, path = %path, "Making Umami API request");

        let mut req = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&credential);

        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(UmamiError::Http)?;
        let status = response.status();

        if !status.is_success() {
            let body = read_body_text(response).await;
            tracing::debug!(method = %method, path = %path, status = %status, "Umami API request failed");
            return Err(UmamiError::Api {
                method,
                path: path.to_string(),
                status,
                body,
            });
        }

        decode_success(response).await
    }

    /// Makes a GET request.
    pub async fn get(&self, path: &str, query: Option<&QueryParams>) -> Result<Value, UmamiError> {
        self.call(Method::GET, path, None, query).await
    }

    /// Makes a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, UmamiError> {
        self.call(Method::POST, path, Some(body), None).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Value, UmamiError> {
        self.call(Method::DELETE, path, None, None).await
    }

    /// Returns the bearer credential for the next request.
    ///
    /// In API-key mode this is the key itself. In password mode the cached
    /// token is reused while it is outside the expiry buffer; otherwise a
    /// new login is performed. Concurrent callers that both miss the cache
    /// each log in and each use their own token.
    async fn bearer_credential(&self) -> Result<String, UmamiError> {
        if self.config.uses_api_key() {
            return Ok(self.config.api_key.clone());
        }

        if let Some(token) = self.credentials.valid_token(self.clock.now_millis()) {
            return Ok(token);
        }

        self.login().await
    }

    /// Exchanges username and password for a token and caches it.
    async fn login(&self) -> Result<String, UmamiError> {
        let url = build_url(&self.config.base_url, LOGIN_PATH, None)?;

        tracing::debug!("Logging in to Umami");

        let response = self
            .http
            .post(url)
            .json(&LoginRequest {
                username: &self.config.username,
                password: &self.config.password,
            })
            .send()
            .await
            .map_err(UmamiError::Http)?;
        let status = response.status();

        if !status.is_success() {
            let body = read_body_text(response).await;
            tracing::warn!(status = %status, "Umami login rejected");
            return Err(UmamiError::Authentication { status, body });
        }

        let body = response.text().await.map_err(UmamiError::Http)?;
        let login: LoginResponse = serde_json::from_str(&body)?;

        let expiry = TokenExpiry::for_token(&login.token, self.clock.now_millis());
        if let TokenExpiry::Fallback(_) = expiry {
            tracing::debug!("Token expiry claim unreadable, assuming 24h validity");
        }
        self.credentials.store(&login.token, expiry);

        tracing::info!("Logged in to Umami");

        Ok(login.token)
    }
}

/// Joins base URL and path and appends the filtered query string.
///
/// The `?` is only added when at least one parameter survives filtering.
pub(crate) fn build_url(
    base_url: &str,
    path: &str,
    query: Option<&QueryParams>,
) -> Result<Url, UmamiError> {
    let mut url = Url::parse(&format!("{}{}", base_url, path))?;

    if let Some(query) = query {
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }

    Ok(url)
}

/// Reads an error response body, substituting empty text if it cannot be read.
async fn read_body_text(response: Response) -> String {
    match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(error = %e, "Could not read error response body");
            String::new()
        }
    }
}

/// Normalizes a success response into a JSON value.
async fn decode_success(response: Response) -> Result<Value, UmamiError> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        return response.json::<Value>().await.map_err(UmamiError::Http);
    }

    let text = response.text().await.map_err(UmamiError::Http)?;
    if text.is_empty() {
        Ok(success_marker())
    } else {
        Ok(Value::String(text))
    }
}

/// The value returned in place of an empty success body.
pub fn success_marker() -> Value {
    json!({ "success": true })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, username: &str, password: &str, api_key: &str) -> UmamiClient {
        UmamiClient::new(Config::new(base_url, username, password, api_key)).unwrap()
    }

    #[test]
    fn test_preflight_requires_base_url() {
        let err = client("", "admin", "pw", "key").preflight().unwrap_err();
        assert!(matches!(err, UmamiError::Config(_)));
        assert!(err.to_string().contains("UMAMI_URL"));
    }

    #[test]
    fn test_preflight_requires_authentication() {
        for (username, password) in [("", ""), ("admin", ""), ("", "pw")] {
            let err = client("https://example.com", username, password, "")
                .preflight()
                .unwrap_err();
            assert!(matches!(err, UmamiError::Config(_)));
            assert!(err.to_string().contains("Authentication not configured"));
        }
    }

    #[test]
    fn test_preflight_accepts_either_mode() {
        assert!(client("https://example.com", "", "", "key").preflight().is_ok());
        assert!(client("https://example.com", "admin", "pw", "").preflight().is_ok());
        assert!(client("https://example.com", "admin", "", "key").preflight().is_ok());
    }

    #[test]
    fn test_build_url_without_query() {
        let url = build_url("https://example.com", "/api/websites", None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/websites");
    }

    #[test]
    fn test_build_url_with_filtered_query() {
        let query = QueryParams::new()
            .with("a", 1i64)
            .with("b", "")
            .with_opt::<String>("c", None)
            .with("d", false);
        let url = build_url("https://example.com", "/api/x", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/x?a=1&d=false");
    }

    #[test]
    fn test_build_url_omits_question_mark_when_all_filtered() {
        let query = QueryParams::new().with("q", "");
        let url = build_url("https://example.com", "/api/x", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/x");
    }

    #[test]
    fn test_build_url_encodes_values() {
        let query = QueryParams::new().with("url", "/pricing?plan=pro&x=1");
        let url = build_url("https://example.com", "/api/x", Some(&query)).unwrap();
        assert_eq!(
            url.query(),
            Some("url=%2Fpricing%3Fplan%3Dpro%26x%3D1")
        );
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let url = build_url("https://example.com/umami", "/api/me", None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/umami/api/me");
    }

    #[test]
    fn test_build_url_rejects_garbage_base() {
        assert!(matches!(
            build_url("not a url", "/api/me", None),
            Err(UmamiError::Url(_))
        ));
    }

    #[test]
    fn test_success_marker() {
        assert_eq!(success_marker(), json!({"success": true}));
    }
}
