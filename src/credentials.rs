//! Login-token caching for password authentication.
//!
//! The cache is owned by one [`UmamiClient`](crate::client::UmamiClient)
//! and shared by its clones. It holds a single token plus the instant it
//! expires. The lock only guards field reads and writes; it is never held
//! across a network request.

use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// A cached token is not reused within this many milliseconds of expiry.
pub const EXPIRY_BUFFER_MS: i64 = 5 * 60 * 1000;

/// Validity assumed for a token whose expiry claim cannot be read.
pub const FALLBACK_VALIDITY_MS: i64 = 24 * 60 * 60 * 1000;

/// Source of the current time, in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Returns the current time in epoch milliseconds.
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }
}

/// When a freshly issued token stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenExpiry {
    /// Read from the token's `exp` claim.
    Claimed(i64),
    /// The claim was unreadable; validity assumed from issue time.
    Fallback(i64),
}

impl TokenExpiry {
    /// Derives the expiry for `token`, issued at `now_millis`.
    pub fn for_token(token: &str, now_millis: i64) -> Self {
        match exp_claim_millis(token) {
            Some(at) => TokenExpiry::Claimed(at),
            None => TokenExpiry::Fallback(now_millis + FALLBACK_VALIDITY_MS),
        }
    }

    /// The expiry instant in epoch milliseconds.
    pub fn at_millis(self) -> i64 {
        match self {
            TokenExpiry::Claimed(at) | TokenExpiry::Fallback(at) => at,
        }
    }
}

/// Reads the `exp` claim (seconds) from the second dot-separated segment.
fn exp_claim_millis(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_f64()?;
    Some((exp * 1000.0) as i64)
}

#[derive(Debug, Default)]
struct CachedToken {
    token: Option<String>,
    expires_at_millis: i64,
}

/// Instance-scoped token cache.
#[derive(Debug, Default)]
pub struct CredentialCache {
    inner: Mutex<CachedToken>,
}

impl CredentialCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token if it is still outside the expiry buffer.
    pub fn valid_token(&self, now_millis: i64) -> Option<String> {
        let cached = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        match &cached.token {
            Some(token) if now_millis < cached.expires_at_millis - EXPIRY_BUFFER_MS => {
                Some(token.clone())
            }
            _ => None,
        }
    }

    /// Replaces the cached token. The last writer wins.
    pub fn store(&self, token: &str, expiry: TokenExpiry) {
        let mut cached = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        cached.token = Some(token.to_string());
        cached.expires_at_millis = expiry.at_millis();
    }

    /// The recorded expiry, if a token is cached.
    #[cfg(test)]
    fn expires_at_millis(&self) -> Option<i64> {
        let cached = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        cached.token.as_ref().map(|_| cached.expires_at_millis)
    }
}
