//! Error types for the Umami MCP server.
//!
//! `UmamiError` is the single error type returned by the API client and
//! surfaced (sanitized) by the MCP tool handlers.
//!
//! # Security
//!
//! Error bodies come straight from the Umami server. Use
//! `sanitized_display()` before handing an error to a log line or an MCP
//! client so the API key and password never leak.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Unified error type for all Umami operations.
#[derive(Error, Debug)]
pub enum UmamiError {
    /// Required settings are missing. Raised before any network activity.
    #[error("{0}")]
    Config(String),

    /// The login exchange returned a non-success status.
    #[error("Umami login failed ({status}): {body}")]
    Authentication {
        /// The HTTP status code returned by the login endpoint.
        status: StatusCode,
        /// The response body, empty if it could not be read.
        body: String,
    },

    /// An API request returned a non-success status.
    #[error("Umami API error {method} {path} ({status}): {body}")]
    Api {
        /// HTTP method of the failed request.
        method: Method,
        /// Request path, relative to the base URL.
        path: String,
        /// The HTTP status code returned.
        status: StatusCode,
        /// The response body, empty if it could not be read.
        body: String,
    },

    /// Transport failure: connection refused, timeout, body read error.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Base URL and path did not form a valid URL.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tool or prompt input was rejected before any request was made.
    #[error("validation error: {0}")]
    Validation(String),
}

impl UmamiError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        UmamiError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        UmamiError::Validation(message.into())
    }

    /// Returns the HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UmamiError::Authentication { status, .. } | UmamiError::Api { status, .. } => {
                Some(*status)
            }
            UmamiError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Replaces every occurrence of each non-empty secret with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, secrets: &[&str]) -> String {
        secrets
            .iter()
            .filter(|secret| !secret.is_empty())
            .fold(message.to_string(), |acc, secret| {
                acc.replace(secret, "[REDACTED]")
            })
    }

    /// Returns this error's display message with all secrets redacted.
    #[must_use]
    pub fn sanitized_display(&self, secrets: &[&str]) -> String {
        Self::sanitize_message(&self.to_string(), secrets)
    }
}
