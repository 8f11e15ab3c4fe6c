//! Event collection payloads for `POST /api/send`.

use serde::Serialize;
use serde_json::{Map, Value};

/// Envelope sent to the collection endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SendEventBody {
    /// `"event"` for custom events, `"pageview"` otherwise.
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// The tracked hit.
    pub payload: EventPayload,
}

/// A single tracked hit.
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    /// Website UUID.
    pub website: String,

    /// Hostname of the site.
    pub hostname: String,

    /// URL path of the hit.
    pub url: String,

    /// Custom event name. Absent for pageviews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Custom event data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,

    /// Referrer URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,

    /// Browser language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Page title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SendEventBody {
    /// Wraps a payload, choosing the hit type from whether it carries a name.
    pub fn new(payload: EventPayload) -> Self {
        let kind = if payload.name.is_some() {
            "event"
        } else {
            "pageview"
        };
        Self { kind, payload }
    }
}
