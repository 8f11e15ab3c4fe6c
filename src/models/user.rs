//! User request bodies.

use serde::Serialize;

/// Body for creating or updating a user. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserBody {
    /// Username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Role: `admin` or `user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserBody {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.role.is_none()
    }
}
