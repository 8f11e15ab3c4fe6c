//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery. Field names are camelCase
//! on the wire to match Umami's own API vocabulary.
//!
//! # Input Sanitization
//!
//! Input structs implement `sanitize()` which trims whitespace from
//! identifiers and text fields and turns blank optional strings into `None`.
//! Passwords are left untouched.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{MetricType, ReportType, TimeUnit};

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Helper function to trim a required string.
fn trim(s: &str) -> String {
    s.trim().to_string()
}

// ============================================================================
// Shared inputs
// ============================================================================

/// Pagination and search parameters for list endpoints.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListInput {
    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page (default 10).
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Search query to filter results.
    #[serde(default)]
    pub query: Option<String>,

    /// Field to order by (e.g. 'name', 'createdAt').
    #[serde(default)]
    pub order_by: Option<String>,
}

impl ListInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            page: self.page,
            page_size: self.page_size,
            query: trim_option(&self.query),
            order_by: trim_option(&self.order_by),
        }
    }
}

/// Input for tools that act on a single website.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteIdInput {
    /// Website UUID.
    pub website_id: String,
}

impl WebsiteIdInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
        }
    }
}

/// Input for tools that query a website over a time window.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeInput {
    /// Website UUID.
    pub website_id: String,

    /// Start timestamp in milliseconds.
    pub start_at: i64,

    /// End timestamp in milliseconds.
    pub end_at: i64,
}

impl DateRangeInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            ..self
        }
    }
}

// ============================================================================
// Website inputs
// ============================================================================

/// Input parameters for the create_website tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebsiteInput {
    /// Website domain (e.g. 'example.com').
    pub domain: String,

    /// Display name for the website.
    pub name: String,

    /// Unique share ID for public access.
    #[serde(default)]
    pub share_id: Option<String>,
}

impl CreateWebsiteInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            domain: trim(&self.domain),
            name: trim(&self.name),
            share_id: trim_option(&self.share_id),
        }
    }
}

/// Input parameters for the update_website tool.
///
/// Website ID is required. At least one other field must be provided.
/// Unlike the other fields, an empty `shareId` is sent as-is.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebsiteInput {
    /// Website UUID.
    pub website_id: String,

    /// New domain.
    #[serde(default)]
    pub domain: Option<String>,

    /// New display name.
    #[serde(default)]
    pub name: Option<String>,

    /// New share ID. An empty string removes the public share.
    #[serde(default)]
    pub share_id: Option<String>,
}

impl UpdateWebsiteInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            domain: trim_option(&self.domain),
            name: trim_option(&self.name),
            // An empty share ID clears the share, so it is kept
            share_id: self.share_id.map(|s| s.trim().to_string()),
        }
    }
}

// ============================================================================
// Stats inputs
// ============================================================================

/// Input parameters for the get_stats tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsInput {
    /// Website UUID.
    pub website_id: String,

    /// Start timestamp in milliseconds.
    pub start_at: i64,

    /// End timestamp in milliseconds.
    pub end_at: i64,

    /// Filter by URL path.
    #[serde(default)]
    pub url: Option<String>,

    /// Filter by referrer.
    #[serde(default)]
    pub referrer: Option<String>,
}

impl StatsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            url: trim_option(&self.url),
            referrer: trim_option(&self.referrer),
            ..self
        }
    }
}

/// Input parameters for the get_pageviews tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageviewsInput {
    /// Website UUID.
    pub website_id: String,

    /// Start timestamp in milliseconds.
    pub start_at: i64,

    /// End timestamp in milliseconds.
    pub end_at: i64,

    /// Time grouping unit.
    pub unit: TimeUnit,

    /// Timezone (e.g. 'Asia/Seoul').
    #[serde(default)]
    pub timezone: Option<String>,

    /// Filter by URL path.
    #[serde(default)]
    pub url: Option<String>,

    /// Filter by referrer.
    #[serde(default)]
    pub referrer: Option<String>,
}

impl PageviewsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            timezone: trim_option(&self.timezone),
            url: trim_option(&self.url),
            referrer: trim_option(&self.referrer),
            ..self
        }
    }
}

/// Input parameters for the get_metrics tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsInput {
    /// Website UUID.
    pub website_id: String,

    /// Start timestamp in milliseconds.
    pub start_at: i64,

    /// End timestamp in milliseconds.
    pub end_at: i64,

    /// Metric type to aggregate.
    #[serde(rename = "type")]
    pub metric_type: MetricType,

    /// Filter by URL path.
    #[serde(default)]
    pub url: Option<String>,

    /// Filter by referrer.
    #[serde(default)]
    pub referrer: Option<String>,

    /// Max results to return (default 500).
    #[serde(default)]
    pub limit: Option<u32>,
}

impl MetricsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            url: trim_option(&self.url),
            referrer: trim_option(&self.referrer),
            ..self
        }
    }
}

/// Input parameters for the get_events tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSeriesInput {
    /// Website UUID.
    pub website_id: String,

    /// Start timestamp in milliseconds.
    pub start_at: i64,

    /// End timestamp in milliseconds.
    pub end_at: i64,

    /// Time grouping unit.
    pub unit: TimeUnit,

    /// Timezone (e.g. 'Asia/Seoul').
    #[serde(default)]
    pub timezone: Option<String>,

    /// Filter by URL path.
    #[serde(default)]
    pub url: Option<String>,
}

impl EventSeriesInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            timezone: trim_option(&self.timezone),
            url: trim_option(&self.url),
            ..self
        }
    }
}

/// Input parameters for the get_sessions tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionsInput {
    /// Website UUID.
    pub website_id: String,

    /// Start timestamp in milliseconds.
    pub start_at: i64,

    /// End timestamp in milliseconds.
    pub end_at: i64,

    /// Search query.
    #[serde(default)]
    pub query: Option<String>,

    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Field to order by.
    #[serde(default)]
    pub order_by: Option<String>,
}

impl SessionsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            query: trim_option(&self.query),
            order_by: trim_option(&self.order_by),
            ..self
        }
    }
}

// ============================================================================
// Session and event inputs
// ============================================================================

/// Input for tools that act on a single session.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    /// Website UUID.
    pub website_id: String,

    /// Session UUID.
    pub session_id: String,
}

impl SessionInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            session_id: trim(&self.session_id),
        }
    }
}

/// Input parameters for the send_event tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEventInput {
    /// Website UUID (used as the 'website' field in payload).
    pub website_id: String,

    /// Hostname of the site (e.g. 'example.com').
    pub hostname: String,

    /// URL path (e.g. '/checkout').
    pub url: String,

    /// Custom event name (omit for pageview).
    #[serde(default)]
    pub event_name: Option<String>,

    /// Custom event data as key-value pairs.
    #[serde(default)]
    pub event_data: Option<Map<String, Value>>,

    /// Referrer URL.
    #[serde(default)]
    pub referrer: Option<String>,

    /// Browser language (e.g. 'en-US').
    #[serde(default)]
    pub language: Option<String>,

    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
}

impl SendEventInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            hostname: trim(&self.hostname),
            url: trim(&self.url),
            event_name: trim_option(&self.event_name),
            event_data: self.event_data,
            referrer: trim_option(&self.referrer),
            language: trim_option(&self.language),
            title: trim_option(&self.title),
        }
    }
}

// ============================================================================
// Report inputs
// ============================================================================

/// Input parameters for the list_reports tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsInput {
    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Field to order by.
    #[serde(default)]
    pub order_by: Option<String>,
}

impl ListReportsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            order_by: trim_option(&self.order_by),
            ..self
        }
    }
}

/// Input for tools that act on a single saved report.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportIdInput {
    /// Report UUID.
    pub report_id: String,
}

impl ReportIdInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            report_id: trim(&self.report_id),
        }
    }
}

/// Input parameters for the create_report tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportInput {
    /// Website UUID.
    pub website_id: String,

    /// Report name.
    pub name: String,

    /// Report type.
    #[serde(rename = "type")]
    pub report_type: ReportType,

    /// Report description.
    #[serde(default)]
    pub description: Option<String>,

    /// Report-specific parameters (JSON object).
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
}

impl CreateReportInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            name: trim(&self.name),
            description: trim_option(&self.description),
            ..self
        }
    }
}

/// Input parameters for the run_report tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunReportInput {
    /// Report type to run.
    #[serde(rename = "type")]
    pub report_type: ReportType,

    /// Website UUID.
    pub website_id: String,

    /// Report-specific parameters (varies by type).
    pub parameters: Map<String, Value>,
}

impl RunReportInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            website_id: trim(&self.website_id),
            ..self
        }
    }
}

// ============================================================================
// User inputs
// ============================================================================

/// Input for tools that act on a single user.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIdInput {
    /// User UUID.
    pub user_id: String,
}

impl UserIdInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            user_id: trim(&self.user_id),
        }
    }
}

/// Input parameters for the create_user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    /// Username for the new user.
    pub username: String,

    /// Password for the new user.
    pub password: String,

    /// User role: 'admin' or 'user' (default: 'user').
    #[serde(default)]
    pub role: Option<String>,
}

impl CreateUserInput {
    /// Sanitizes input by trimming whitespace from all fields but the password.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            username: trim(&self.username),
            password: self.password,
            role: trim_option(&self.role),
        }
    }
}

/// Input parameters for the update_user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    /// User UUID.
    pub user_id: String,

    /// New username.
    #[serde(default)]
    pub username: Option<String>,

    /// New password.
    #[serde(default)]
    pub password: Option<String>,

    /// New role: 'admin' or 'user'.
    #[serde(default)]
    pub role: Option<String>,
}

impl UpdateUserInput {
    /// Sanitizes input by trimming whitespace from all fields but the password.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            user_id: trim(&self.user_id),
            username: trim_option(&self.username),
            password: self.password.filter(|p| !p.is_empty()),
            role: trim_option(&self.role),
        }
    }
}

/// Input parameters for the get_user_websites tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWebsitesInput {
    /// User UUID.
    pub user_id: String,

    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Search query to filter websites.
    #[serde(default)]
    pub query: Option<String>,
}

impl UserWebsitesInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            user_id: trim(&self.user_id),
            query: trim_option(&self.query),
            ..self
        }
    }
}

/// Input parameters for the get_user_usage tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUsageInput {
    /// User UUID.
    pub user_id: String,

    /// Start timestamp in milliseconds.
    #[serde(default)]
    pub start_at: Option<i64>,

    /// End timestamp in milliseconds.
    #[serde(default)]
    pub end_at: Option<i64>,
}

impl UserUsageInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            user_id: trim(&self.user_id),
            ..self
        }
    }
}

// ============================================================================
// Team inputs
// ============================================================================

/// Input for tools that act on a single team.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamIdInput {
    /// Team UUID.
    pub team_id: String,
}

impl TeamIdInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            team_id: trim(&self.team_id),
        }
    }
}

/// Input parameters for the create_team tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamInput {
    /// Team name.
    pub name: String,
}

impl CreateTeamInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: trim(&self.name),
        }
    }
}

/// Input parameters for the update_team tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamInput {
    /// Team UUID.
    pub team_id: String,

    /// New team name.
    pub name: String,
}

impl UpdateTeamInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            team_id: trim(&self.team_id),
            name: trim(&self.name),
        }
    }
}

/// Input parameters for the join_team tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamInput {
    /// Team access/invite code.
    pub access_code: String,
}

impl JoinTeamInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            access_code: trim(&self.access_code),
        }
    }
}

/// Input parameters for the list_team_users tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamUsersInput {
    /// Team UUID.
    pub team_id: String,

    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Search query to filter members.
    #[serde(default)]
    pub query: Option<String>,
}

impl TeamUsersInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            team_id: trim(&self.team_id),
            query: trim_option(&self.query),
            ..self
        }
    }
}

/// Input parameters for the add_team_user and update_team_user tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberInput {
    /// Team UUID.
    pub team_id: String,

    /// User UUID.
    pub user_id: String,

    /// Role in the team: 'team-owner' or 'team-member'.
    pub role: String,
}

impl TeamMemberInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            team_id: trim(&self.team_id),
            user_id: trim(&self.user_id),
            role: trim(&self.role),
        }
    }
}

/// Input parameters for the remove_team_user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberRefInput {
    /// Team UUID.
    pub team_id: String,

    /// User UUID to remove.
    pub user_id: String,
}

impl TeamMemberRefInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            team_id: trim(&self.team_id),
            user_id: trim(&self.user_id),
        }
    }
}
