//! Website request bodies.

use serde::Serialize;

/// Body for creating or updating a website.
///
/// Fields left as `None` are omitted so an update only touches what was
/// provided.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteBody {
    /// Website domain (e.g., `example.com`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Share ID for the public dashboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
}

impl WebsiteBody {
    /// Body for a new website.
    pub fn create(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            name: Some(name.into()),
            share_id: None,
        }
    }

    /// Sets the share ID.
    pub fn with_share_id(mut self, share_id: Option<String>) -> Self {
        self.share_id = share_id;
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.domain.is_none() && self.name.is_none() && self.share_id.is_none()
    }
}
