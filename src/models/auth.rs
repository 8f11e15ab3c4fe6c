//! Login exchange payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    /// Account username.
    pub username: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// Response of a successful login. Other fields (the user record) are ignored.
#[derive(Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
}
