//! Prompt templates that guide a model through multi-tool analyses.
//!
//! Rendering is pure: timestamps are passed in, dates are parsed here, and
//! the server only wraps the text in an MCP prompt message.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

use crate::error::UmamiError;

/// One day in milliseconds.
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Arguments for the site_overview prompt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteOverviewArgs {
    /// Website UUID to analyze.
    pub website_id: String,
}

/// Arguments for the traffic_compare prompt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrafficCompareArgs {
    /// Website UUID to analyze.
    pub website_id: String,
    /// Period 1 start date (ISO 8601, e.g. '2025-01-01').
    pub period1_start: String,
    /// Period 1 end date (ISO 8601).
    pub period1_end: String,
    /// Period 2 start date (ISO 8601).
    pub period2_start: String,
    /// Period 2 end date (ISO 8601).
    pub period2_end: String,
}

/// Renders the site overview prompt for the seven days ending at `now_millis`.
pub fn site_overview(website_id: &str, now_millis: i64) -> String {
    let start = now_millis - 7 * DAY_MS;
    [
        format!("Provide a comprehensive analytics overview for website ID: {website_id}"),
        String::new(),
        "Please use the following tools in order:".to_string(),
        format!(
            "1. get_stats - get summary statistics for the last 7 days (startAt: {start}, endAt: {now_millis})"
        ),
        "2. get_pageviews - get daily pageview trends for the last 7 days with unit \"day\"".to_string(),
        "3. get_metrics - get top 10 pages (type: \"url\", limit: 10) for the last 7 days".to_string(),
        "4. get_metrics - get top 5 referrers (type: \"referrer\", limit: 5) for the last 7 days".to_string(),
        "5. get_active_visitors - get current active visitor count".to_string(),
        String::new(),
        "Then summarize all findings in a clear, structured report with:".to_string(),
        "- Key metrics (pageviews, visitors, bounce rate, avg visit time)".to_string(),
        "- Traffic trend (up/down compared to previous period)".to_string(),
        "- Top performing pages".to_string(),
        "- Top traffic sources".to_string(),
        "- Current real-time activity".to_string(),
    ]
    .join("\n")
}

/// Renders the traffic comparison prompt.
///
/// # Errors
///
/// Returns `UmamiError::Validation` if any period bound is not a date.
pub fn traffic_compare(args: &TrafficCompareArgs) -> Result<String, UmamiError> {
    let p1s = parse_date_millis("period1Start", &args.period1_start)?;
    let p1e = parse_date_millis("period1End", &args.period1_end)?;
    let p2s = parse_date_millis("period2Start", &args.period2_start)?;
    let p2e = parse_date_millis("period2End", &args.period2_end)?;

    Ok([
        format!(
            "Compare traffic for website {} between two periods:",
            args.website_id
        ),
        format!("- Period 1: {} to {}", args.period1_start, args.period1_end),
        format!("- Period 2: {} to {}", args.period2_start, args.period2_end),
        String::new(),
        "Use these tools for each period:".to_string(),
        format!("1. get_stats - Period 1 (startAt: {p1s}, endAt: {p1e})"),
        format!("2. get_stats - Period 2 (startAt: {p2s}, endAt: {p2e})"),
        format!(
            "3. get_metrics - Period 1 top pages (type: \"url\", limit: 10, startAt: {p1s}, endAt: {p1e})"
        ),
        format!(
            "4. get_metrics - Period 2 top pages (type: \"url\", limit: 10, startAt: {p2s}, endAt: {p2e})"
        ),
        String::new(),
        "Then provide a comparison report:".to_string(),
        "- Percentage changes in key metrics (pageviews, visitors, bounce rate)".to_string(),
        "- Pages that gained or lost traffic".to_string(),
        "- Overall trend assessment and recommendations".to_string(),
    ]
    .join("\n"))
}

/// Parses an ISO-8601 date or date-time into epoch milliseconds.
///
/// Date-only values and date-times without an offset are read as UTC.
fn parse_date_millis(field: &str, value: &str) -> Result<i64, UmamiError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    Err(UmamiError::validation(format!(
        "{} is not a valid ISO 8601 date: {:?}",
        field, value
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_args(p1s: &str) -> TrafficCompareArgs {
        TrafficCompareArgs {
            website_id: "w-1".to_string(),
            period1_start: p1s.to_string(),
            period1_end: "2025-01-31".to_string(),
            period2_start: "2025-02-01".to_string(),
            period2_end: "2025-02-28".to_string(),
        }
    }

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        assert_eq!(
            parse_date_millis("d", "2025-01-01").unwrap(),
            1_735_689_600_000
        );
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(
            parse_date_millis("d", "2025-01-01T02:00:00+02:00").unwrap(),
            1_735_689_600_000
        );
    }

    #[test]
    fn test_parse_naive_datetime_is_utc() {
        assert_eq!(
            parse_date_millis("d", "2025-01-01T00:00:01").unwrap(),
            1_735_689_601_000
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_date_millis("period1Start", "last tuesday").unwrap_err();
        assert!(matches!(err, UmamiError::Validation(_)));
        assert!(err.to_string().contains("period1Start"));
    }

    #[test]
    fn test_site_overview_uses_seven_day_window() {
        let now = 1_735_689_600_000;
        let text = site_overview("w-1", now);
        assert!(text.contains("website ID: w-1"));
        assert!(text.contains(&format!("startAt: {}, endAt: {}", now - 7 * DAY_MS, now)));
        assert!(text.contains("get_active_visitors"));
    }

    #[test]
    fn test_traffic_compare_renders_millis() {
        let text = traffic_compare(&compare_args("2025-01-01")).unwrap();
        assert!(text.contains("Compare traffic for website w-1"));
        assert!(text.contains("- Period 1: 2025-01-01 to 2025-01-31"));
        assert!(text.contains("startAt: 1735689600000"));
    }

    #[test]
    fn test_traffic_compare_rejects_bad_date() {
        assert!(traffic_compare(&compare_args("soon")).is_err());
    }
}
