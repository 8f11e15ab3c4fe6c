//! MCP server implementation for Umami.
//!
//! This module defines the `UmamiServer` struct that implements the MCP
//! `ServerHandler` trait, exposing Umami operations as tools, two read-only
//! resources and two analysis prompts. Every handler goes through the
//! shared [`UmamiClient`].

use std::borrow::Cow;

use rmcp::{
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::{
        AnnotateAble, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        ListResourcesResult, PaginatedRequestParam, PromptMessage,
        PromptMessageRole, RawResource, ReadResourceRequestParam, ReadResourceResult,
        ResourceContents, ServerCapabilities, ServerInfo,
    },
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde::Serialize;
use serde_json::Value;

use crate::client::UmamiClient;
use crate::error::UmamiError;
use crate::models::{
    run_report_body, CreateReportBody, EventPayload, JoinTeamBody, SendEventBody, TeamBody,
    TeamUserBody, UserBody, WebsiteBody,
};
use crate::prompts::{self, SiteOverviewArgs, TrafficCompareArgs};
use crate::query::QueryParams;
use crate::resources::{self, RESOURCE_MIME_TYPE};
use crate::tools::{
    CreateReportInput, CreateTeamInput, CreateUserInput, CreateWebsiteInput, DateRangeInput,
    EventSeriesInput, JoinTeamInput, ListInput, ListReportsInput, MetricsInput, PageviewsInput,
    ReportIdInput, RunReportInput, SendEventInput, SessionInput, SessionsInput, StatsInput,
    TeamIdInput, TeamMemberInput, TeamMemberRefInput, TeamUsersInput, UpdateTeamInput,
    UpdateUserInput, UpdateWebsiteInput, UserIdInput, UserUsageInput, UserWebsitesInput,
    WebsiteIdInput,
};

/// The Umami MCP server.
#[derive(Clone)]
pub struct UmamiServer {
    /// Umami client for API operations.
    client: UmamiClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
    /// Prompt router for MCP prompt dispatch.
    prompt_router: PromptRouter<Self>,
}

#[tool_router]
impl UmamiServer {
    /// Creates a new server instance around a configured client.
    pub fn new(client: UmamiClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    // ========================================================================
    // Website tools
    // ========================================================================

    #[tool(description = "List all websites tracked in Umami")]
    async fn list_websites(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "list_websites tool called");

        let result = self
            .client
            .get("/api/websites", Some(&list_query(&input)))
            .await;
        self.render("list websites", result)
    }

    #[tool(description = "Get details of a specific website by ID")]
    async fn get_website(
        &self,
        Parameters(input): Parameters<WebsiteIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, "get_website tool called");
        require("websiteId", &input.website_id)?;

        let path = format!("/api/websites/{}", seg(&input.website_id));
        let result = self.client.get(&path, None).await;
        self.render("get website", result)
    }

    #[tool(description = "Create a new website to track in Umami")]
    async fn create_website(
        &self,
        Parameters(input): Parameters<CreateWebsiteInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(domain = %input.domain, "create_website tool called");
        require("domain", &input.domain)?;
        require("name", &input.name)?;

        let body = WebsiteBody::create(input.domain, input.name).with_share_id(input.share_id);
        let body = self.to_body("create website", &body)?;
        let result = self.client.post("/api/websites", &body).await;
        self.render("create website", result)
    }

    #[tool(description = "Update an existing website's configuration")]
    async fn update_website(
        &self,
        Parameters(input): Parameters<UpdateWebsiteInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, "update_website tool called");
        require("websiteId", &input.website_id)?;

        let body = WebsiteBody {
            domain: input.domain,
            name: input.name,
            share_id: input.share_id,
        };
        if body.is_empty() {
            return Err(
                "At least one field must be provided for update (domain, name, or shareId)."
                    .to_string(),
            );
        }

        let body = self.to_body("update website", &body)?;
        let path = format!("/api/websites/{}", seg(&input.website_id));
        let result = self.client.post(&path, &body).await;
        self.render("update website", result)
    }

    #[tool(description = "Delete a website from Umami")]
    async fn delete_website(
        &self,
        Parameters(input): Parameters<WebsiteIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, "delete_website tool called");
        require("websiteId", &input.website_id)?;

        let path = format!("/api/websites/{}", seg(&input.website_id));
        self.client
            .delete(&path)
            .await
            .map_err(|e| self.failure("delete website", &e))?;

        Ok(format!("Website {} deleted successfully.", input.website_id))
    }

    #[tool(description = "Get the number of currently active visitors on a website")]
    async fn get_active_visitors(
        &self,
        Parameters(input): Parameters<WebsiteIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, "get_active_visitors tool called");
        require("websiteId", &input.website_id)?;

        let path = format!("/api/websites/{}/active", seg(&input.website_id));
        let result = self.client.get(&path, None).await;
        self.render("get active visitors", result)
    }

    // ========================================================================
    // Stats tools
    // ========================================================================

    #[tool(description = "Get summary statistics for a website (pageviews, visitors, visits, bounces, totaltime)")]
    async fn get_stats(&self, Parameters(input): Parameters<StatsInput>) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_stats tool called");
        require("websiteId", &input.website_id)?;

        let query = QueryParams::new()
            .with("startAt", input.start_at)
            .with("endAt", input.end_at)
            .with_opt("url", input.url)
            .with_opt("referrer", input.referrer);
        let path = format!("/api/websites/{}/stats", seg(&input.website_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("get stats", result)
    }

    #[tool(description = "Get pageview and session counts over time for a website")]
    async fn get_pageviews(
        &self,
        Parameters(input): Parameters<PageviewsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_pageviews tool called");
        require("websiteId", &input.website_id)?;

        let query = QueryParams::new()
            .with("startAt", input.start_at)
            .with("endAt", input.end_at)
            .with("unit", input.unit.as_str())
            .with_opt("timezone", input.timezone)
            .with_opt("url", input.url)
            .with_opt("referrer", input.referrer);
        let path = format!("/api/websites/{}/pageviews", seg(&input.website_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("get pageviews", result)
    }

    #[tool(description = "Get aggregated metrics for a website (e.g. top pages, browsers, countries, devices, OS, events)")]
    async fn get_metrics(
        &self,
        Parameters(input): Parameters<MetricsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_metrics tool called");
        require("websiteId", &input.website_id)?;

        let query = QueryParams::new()
            .with("startAt", input.start_at)
            .with("endAt", input.end_at)
            .with("type", input.metric_type.as_str())
            .with_opt("url", input.url)
            .with_opt("referrer", input.referrer)
            .with_opt("limit", input.limit);
        let path = format!("/api/websites/{}/metrics", seg(&input.website_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("get metrics", result)
    }

    #[tool(description = "Get event data for a website over time")]
    async fn get_events(
        &self,
        Parameters(input): Parameters<EventSeriesInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_events tool called");
        require("websiteId", &input.website_id)?;

        let query = QueryParams::new()
            .with("startAt", input.start_at)
            .with("endAt", input.end_at)
            .with("unit", input.unit.as_str())
            .with_opt("timezone", input.timezone)
            .with_opt("url", input.url);
        let path = format!("/api/websites/{}/events", seg(&input.website_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("get events", result)
    }

    #[tool(description = "Get session data for a website")]
    async fn get_sessions(
        &self,
        Parameters(input): Parameters<SessionsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_sessions tool called");
        require("websiteId", &input.website_id)?;

        let query = QueryParams::new()
            .with("startAt", input.start_at)
            .with("endAt", input.end_at)
            .with_opt("query", input.query)
            .with_opt("page", input.page)
            .with_opt("pageSize", input.page_size)
            .with_opt("orderBy", input.order_by);
        let path = format!("/api/websites/{}/sessions", seg(&input.website_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("get sessions", result)
    }

    #[tool(description = "Get the date range of available data for a website")]
    async fn get_daterange(
        &self,
        Parameters(input): Parameters<WebsiteIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, "get_daterange tool called");
        require("websiteId", &input.website_id)?;

        let path = format!("/api/websites/{}/daterange", seg(&input.website_id));
        let result = self.client.get(&path, None).await;
        self.render("get date range", result)
    }

    // ========================================================================
    // Session tools
    // ========================================================================

    #[tool(description = "Get details of a specific session")]
    async fn get_session(
        &self,
        Parameters(input): Parameters<SessionInput>,
    ) -> Result<String, String> {
        self.session_lookup("get session", input, "").await
    }

    #[tool(description = "Get activity log for a specific session (pages visited, events fired)")]
    async fn get_session_activity(
        &self,
        Parameters(input): Parameters<SessionInput>,
    ) -> Result<String, String> {
        self.session_lookup("get session activity", input, "/activity")
            .await
    }

    #[tool(description = "Get custom properties attached to a specific session")]
    async fn get_session_properties(
        &self,
        Parameters(input): Parameters<SessionInput>,
    ) -> Result<String, String> {
        self.session_lookup("get session properties", input, "/properties")
            .await
    }

    // ========================================================================
    // Event tools
    // ========================================================================

    #[tool(description = "Send a custom event or pageview to Umami (useful for server-side tracking)")]
    async fn send_event(
        &self,
        Parameters(input): Parameters<SendEventInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, event = ?input.event_name, "send_event tool called");
        require("websiteId", &input.website_id)?;
        require("hostname", &input.hostname)?;
        require("url", &input.url)?;

        let body = SendEventBody::new(EventPayload {
            website: input.website_id,
            hostname: input.hostname,
            url: input.url,
            name: input.event_name,
            data: input.event_data,
            referrer: input.referrer,
            language: input.language,
            title: input.title,
        });
        let body = self.to_body("send event", &body)?;
        self.client
            .post("/api/send", &body)
            .await
            .map_err(|e| self.failure("send event", &e))?;

        Ok("Event sent successfully.".to_string())
    }

    #[tool(description = "Get event or session property values for a website")]
    async fn get_event_values(
        &self,
        Parameters(input): Parameters<DateRangeInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_event_values tool called");
        require("websiteId", &input.website_id)?;

        let query = QueryParams::new()
            .with("startAt", input.start_at)
            .with("endAt", input.end_at);
        let path = format!("/api/websites/{}/values", seg(&input.website_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("get event values", result)
    }

    // ========================================================================
    // Realtime tools
    // ========================================================================

    #[tool(description = "Get real-time data for a website (last 30 minutes). Returns current visitors, active URLs, referrers, countries, and events.")]
    async fn get_realtime(
        &self,
        Parameters(input): Parameters<WebsiteIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, "get_realtime tool called");
        require("websiteId", &input.website_id)?;

        let path = format!("/api/realtime/{}", seg(&input.website_id));
        let result = self.client.get(&path, None).await;
        self.render("get realtime data", result)
    }

    // ========================================================================
    // Report tools
    // ========================================================================

    #[tool(description = "List all saved reports")]
    async fn list_reports(
        &self,
        Parameters(input): Parameters<ListReportsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "list_reports tool called");

        let query = QueryParams::new()
            .with_opt("page", input.page)
            .with_opt("pageSize", input.page_size)
            .with_opt("orderBy", input.order_by);
        let result = self.client.get("/api/reports", Some(&query)).await;
        self.render("list reports", result)
    }

    #[tool(description = "Get details of a specific saved report")]
    async fn get_report(
        &self,
        Parameters(input): Parameters<ReportIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(report_id = %input.report_id, "get_report tool called");
        require("reportId", &input.report_id)?;

        let path = format!("/api/reports/{}", seg(&input.report_id));
        let result = self.client.get(&path, None).await;
        self.render("get report", result)
    }

    #[tool(description = "Create and save a new report")]
    async fn create_report(
        &self,
        Parameters(input): Parameters<CreateReportInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, report_type = ?input.report_type, "create_report tool called");
        require("websiteId", &input.website_id)?;
        require("name", &input.name)?;

        let body = CreateReportBody {
            website_id: input.website_id,
            name: input.name,
            report_type: input.report_type,
            description: input.description,
            parameters: input.parameters,
        };
        let body = self.to_body("create report", &body)?;
        let result = self.client.post("/api/reports", &body).await;
        self.render("create report", result)
    }

    #[tool(description = "Execute a report by type and get results (funnel, retention, utm, goals, insights, revenue, journey)")]
    async fn run_report(
        &self,
        Parameters(input): Parameters<RunReportInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, report_type = ?input.report_type, "run_report tool called");
        require("websiteId", &input.website_id)?;

        let body = run_report_body(&input.website_id, input.parameters);
        let path = format!("/api/reports/{}", input.report_type.as_str());
        let result = self.client.post(&path, &body).await;
        self.render("run report", result)
    }

    // ========================================================================
    // User tools
    // ========================================================================

    #[tool(description = "List all users (admin only)")]
    async fn list_users(&self, Parameters(input): Parameters<ListInput>) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "list_users tool called");

        let result = self.client.get("/api/users", Some(&list_query(&input))).await;
        self.render("list users", result)
    }

    #[tool(description = "Create a new user (admin only)")]
    async fn create_user(
        &self,
        Parameters(input): Parameters<CreateUserInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(username = %input.username, "create_user tool called");
        require("username", &input.username)?;
        if input.password.is_empty() {
            return Err("password is required and cannot be empty.".to_string());
        }

        let body = UserBody {
            username: Some(input.username),
            password: Some(input.password),
            role: input.role,
        };
        let body = self.to_body("create user", &body)?;
        let result = self.client.post("/api/users", &body).await;
        self.render("create user", result)
    }

    #[tool(description = "Get details of a specific user (admin only)")]
    async fn get_user(&self, Parameters(input): Parameters<UserIdInput>) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(user_id = %input.user_id, "get_user tool called");
        require("userId", &input.user_id)?;

        let path = format!("/api/users/{}", seg(&input.user_id));
        let result = self.client.get(&path, None).await;
        self.render("get user", result)
    }

    #[tool(description = "Update a user's username, password, or role (admin only)")]
    async fn update_user(
        &self,
        Parameters(input): Parameters<UpdateUserInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(user_id = %input.user_id, "update_user tool called");
        require("userId", &input.user_id)?;

        let body = UserBody {
            username: input.username,
            password: input.password,
            role: input.role,
        };
        if body.is_empty() {
            return Err(
                "At least one field must be provided for update (username, password, or role)."
                    .to_string(),
            );
        }

        let body = self.to_body("update user", &body)?;
        let path = format!("/api/users/{}", seg(&input.user_id));
        let result = self.client.post(&path, &body).await;
        self.render("update user", result)
    }

    #[tool(description = "Delete a user (admin only)")]
    async fn delete_user(
        &self,
        Parameters(input): Parameters<UserIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(user_id = %input.user_id, "delete_user tool called");
        require("userId", &input.user_id)?;

        let path = format!("/api/users/{}", seg(&input.user_id));
        self.client
            .delete(&path)
            .await
            .map_err(|e| self.failure("delete user", &e))?;

        Ok(format!("User {} deleted successfully.", input.user_id))
    }

    #[tool(description = "Get the list of websites a user has access to (admin only)")]
    async fn get_user_websites(
        &self,
        Parameters(input): Parameters<UserWebsitesInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_user_websites tool called");
        require("userId", &input.user_id)?;

        let query = QueryParams::new()
            .with_opt("page", input.page)
            .with_opt("pageSize", input.page_size)
            .with_opt("query", input.query);
        let path = format!("/api/users/{}/websites", seg(&input.user_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("get user websites", result)
    }

    #[tool(description = "Get usage statistics for a specific user (admin only)")]
    async fn get_user_usage(
        &self,
        Parameters(input): Parameters<UserUsageInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_user_usage tool called");
        require("userId", &input.user_id)?;

        let query = QueryParams::new()
            .with_opt("startAt", input.start_at)
            .with_opt("endAt", input.end_at);
        let path = format!("/api/users/{}/usage", seg(&input.user_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("get user usage", result)
    }

    // ========================================================================
    // Team tools
    // ========================================================================

    #[tool(description = "List all teams")]
    async fn list_teams(&self, Parameters(input): Parameters<ListInput>) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "list_teams tool called");

        let result = self.client.get("/api/teams", Some(&list_query(&input))).await;
        self.render("list teams", result)
    }

    #[tool(description = "Create a new team")]
    async fn create_team(
        &self,
        Parameters(input): Parameters<CreateTeamInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "create_team tool called");
        require("name", &input.name)?;

        let body = self.to_body("create team", &TeamBody { name: input.name })?;
        let result = self.client.post("/api/teams", &body).await;
        self.render("create team", result)
    }

    #[tool(description = "Get details of a specific team")]
    async fn get_team(&self, Parameters(input): Parameters<TeamIdInput>) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(team_id = %input.team_id, "get_team tool called");
        require("teamId", &input.team_id)?;

        let path = format!("/api/teams/{}", seg(&input.team_id));
        let result = self.client.get(&path, None).await;
        self.render("get team", result)
    }

    #[tool(description = "Update a team's name")]
    async fn update_team(
        &self,
        Parameters(input): Parameters<UpdateTeamInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(team_id = %input.team_id, "update_team tool called");
        require("teamId", &input.team_id)?;
        require("name", &input.name)?;

        let body = self.to_body("update team", &TeamBody { name: input.name })?;
        let path = format!("/api/teams/{}", seg(&input.team_id));
        let result = self.client.post(&path, &body).await;
        self.render("update team", result)
    }

    #[tool(description = "Delete a team")]
    async fn delete_team(
        &self,
        Parameters(input): Parameters<TeamIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(team_id = %input.team_id, "delete_team tool called");
        require("teamId", &input.team_id)?;

        let path = format!("/api/teams/{}", seg(&input.team_id));
        self.client
            .delete(&path)
            .await
            .map_err(|e| self.failure("delete team", &e))?;

        Ok(format!("Team {} deleted successfully.", input.team_id))
    }

    #[tool(description = "Join a team using an access code")]
    async fn join_team(
        &self,
        Parameters(input): Parameters<JoinTeamInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!("join_team tool called");
        require("accessCode", &input.access_code)?;

        let body = self.to_body(
            "join team",
            &JoinTeamBody {
                access_code: input.access_code,
            },
        )?;
        let result = self.client.post("/api/teams/join", &body).await;
        self.render("join team", result)
    }

    #[tool(description = "List all members of a team")]
    async fn list_team_users(
        &self,
        Parameters(input): Parameters<TeamUsersInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "list_team_users tool called");
        require("teamId", &input.team_id)?;

        let query = QueryParams::new()
            .with_opt("page", input.page)
            .with_opt("pageSize", input.page_size)
            .with_opt("query", input.query);
        let path = format!("/api/teams/{}/users", seg(&input.team_id));
        let result = self.client.get(&path, Some(&query)).await;
        self.render("list team users", result)
    }

    #[tool(description = "Add a user to a team")]
    async fn add_team_user(
        &self,
        Parameters(input): Parameters<TeamMemberInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(team_id = %input.team_id, user_id = %input.user_id, "add_team_user tool called");
        require("teamId", &input.team_id)?;
        require("userId", &input.user_id)?;
        require("role", &input.role)?;

        let body = self.to_body(
            "add team user",
            &TeamUserBody {
                user_id: Some(input.user_id),
                role: input.role,
            },
        )?;
        let path = format!("/api/teams/{}/users", seg(&input.team_id));
        let result = self.client.post(&path, &body).await;
        self.render("add team user", result)
    }

    #[tool(description = "Update a team member's role")]
    async fn update_team_user(
        &self,
        Parameters(input): Parameters<TeamMemberInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(team_id = %input.team_id, user_id = %input.user_id, "update_team_user tool called");
        require("teamId", &input.team_id)?;
        require("userId", &input.user_id)?;
        require("role", &input.role)?;

        let body = self.to_body(
            "update team user",
            &TeamUserBody {
                user_id: None,
                role: input.role,
            },
        )?;
        let path = format!(
            "/api/teams/{}/users/{}",
            seg(&input.team_id),
            seg(&input.user_id)
        );
        let result = self.client.post(&path, &body).await;
        self.render("update team user", result)
    }

    #[tool(description = "Remove a user from a team")]
    async fn remove_team_user(
        &self,
        Parameters(input): Parameters<TeamMemberRefInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(team_id = %input.team_id, user_id = %input.user_id, "remove_team_user tool called");
        require("teamId", &input.team_id)?;
        require("userId", &input.user_id)?;

        let path = format!(
            "/api/teams/{}/users/{}",
            seg(&input.team_id),
            seg(&input.user_id)
        );
        self.client
            .delete(&path)
            .await
            .map_err(|e| self.failure("remove team user", &e))?;

        Ok(format!(
            "User {} removed from team {}.",
            input.user_id, input.team_id
        ))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Fetches a session or one of its sub-resources.
    async fn session_lookup(
        &self,
        operation: &str,
        input: SessionInput,
        suffix: &str,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(website_id = %input.website_id, session_id = %input.session_id, operation, "session tool called");
        require("websiteId", &input.website_id)?;
        require("sessionId", &input.session_id)?;

        let path = format!(
            "/api/websites/{}/sessions/{}{}",
            seg(&input.website_id),
            seg(&input.session_id),
            suffix
        );
        let result = self.client.get(&path, None).await;
        self.render(operation, result)
    }

    /// Formats an API result as pretty JSON, or a sanitized failure message.
    fn render(&self, operation: &str, result: Result<Value, UmamiError>) -> Result<String, String> {
        let value = result.map_err(|e| self.failure(operation, &e))?;
        serde_json::to_string_pretty(&value).map_err(|e| self.failure(operation, &UmamiError::from(e)))
    }

    /// Serializes a request body.
    fn to_body<T: Serialize>(&self, operation: &str, body: &T) -> Result<Value, String> {
        serde_json::to_value(body).map_err(|e| self.failure(operation, &UmamiError::from(e)))
    }

    /// Logs a failed operation and returns the message shown to the client.
    fn failure(&self, operation: &str, error: &UmamiError) -> String {
        let sanitized = self.sanitize_error(error);
        tracing::error!(error = %sanitized, operation, "Umami operation failed");
        format!("Failed to {}: {}", operation, sanitized)
    }

    /// Sanitizes an error message to remove the API key and password.
    fn sanitize_error(&self, error: &UmamiError) -> String {
        error.sanitized_display(&self.client.secrets())
    }
}

#[prompt_router]
impl UmamiServer {
    #[prompt(
        name = "site_overview",
        description = "Comprehensive overview of a website's analytics: fetches stats, pageviews, top pages, and active visitors"
    )]
    async fn site_overview(
        &self,
        Parameters(args): Parameters<SiteOverviewArgs>,
    ) -> Vec<PromptMessage> {
        tracing::debug!(website_id = %args.website_id, "site_overview prompt requested");
        let text = prompts::site_overview(args.website_id.trim(), self.client.now_millis());
        vec![PromptMessage::new_text(PromptMessageRole::User, text)]
    }

    #[prompt(
        name = "traffic_compare",
        description = "Compare traffic between two date ranges to identify trends"
    )]
    async fn traffic_compare(
        &self,
        Parameters(args): Parameters<TrafficCompareArgs>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        tracing::debug!(website_id = %args.website_id, "traffic_compare prompt requested");
        let text = prompts::traffic_compare(&args)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        Ok(vec![PromptMessage::new_text(PromptMessageRole::User, text)])
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for UmamiServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Umami MCP provides access to Umami web analytics. \
                 Use list_websites to find website IDs, then get_stats, get_pageviews, \
                 get_metrics and get_realtime for traffic data. Timestamps are epoch \
                 milliseconds. Sessions, events, reports, users and teams have their \
                 own tools. The site_overview and traffic_compare prompts chain these \
                 tools into a full analysis."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = resources::RESOURCES
            .iter()
            .map(|spec| {
                let mut raw = RawResource::new(spec.uri, spec.name);
                raw.description = Some(spec.description.to_string());
                raw.mime_type = Some(RESOURCE_MIME_TYPE.to_string());
                raw.no_annotation()
            })
            .collect();

        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri, .. }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_resource_uri(uri).await
    }
}

impl UmamiServer {
    /// Fetches the endpoint behind a resource URI as pretty JSON text.
    async fn read_resource_uri(&self, uri: String) -> Result<ReadResourceResult, McpError> {
        tracing::debug!(uri = %uri, "read_resource called");

        let spec = resources::find(&uri).ok_or_else(|| {
            McpError::resource_not_found(format!("unknown resource: {}", uri), None)
        })?;

        let data = self
            .client
            .get(spec.api_path, None)
            .await
            .map_err(|e| McpError::internal_error(self.failure("read resource", &e), None))?;

        let text = serde_json::to_string_pretty(&data)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let mut contents = ResourceContents::text(text, uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some(RESOURCE_MIME_TYPE.to_string());
        }

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

/// Percent-encodes an identifier for use as a single path segment.
fn seg(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Rejects blank required fields before any request is made.
fn require(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} is required and cannot be empty.", field));
    }
    Ok(())
}

/// Query parameters shared by the paginated list tools.
fn list_query(input: &ListInput) -> QueryParams {
    QueryParams::new()
        .with_opt("page", input.page)
        .with_opt("pageSize", input.page_size)
        .with_opt("query", input.query.clone())
        .with_opt("orderBy", input.order_by.clone())
}
