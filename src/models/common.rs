//! Enumerations shared by stats and report tools.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// Time bucket for time-series endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Hourly buckets.
    Hour,
    /// Daily buckets.
    Day,
    /// Weekly buckets.
    Week,
    /// Monthly buckets.
    Month,
    /// Yearly buckets.
    Year,
}

impl TimeUnit {
    /// The value Umami expects in the `unit` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }
}

/// Dimension to aggregate in `get_metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    /// Page URL path.
    Url,
    /// Referring URL.
    Referrer,
    /// Browser name.
    Browser,
    /// Operating system.
    Os,
    /// Device class.
    Device,
    /// Country code.
    Country,
    /// Region.
    Region,
    /// City.
    City,
    /// Browser language.
    Language,
    /// Custom event name.
    Event,
    /// Query string.
    Query,
    /// Page title.
    Title,
    /// Hostname.
    Host,
    /// Website tag.
    Tag,
}

impl MetricType {
    /// The value Umami expects in the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Url => "url",
            MetricType::Referrer => "referrer",
            MetricType::Browser => "browser",
            MetricType::Os => "os",
            MetricType::Device => "device",
            MetricType::Country => "country",
            MetricType::Region => "region",
            MetricType::City => "city",
            MetricType::Language => "language",
            MetricType::Event => "event",
            MetricType::Query => "query",
            MetricType::Title => "title",
            MetricType::Host => "host",
            MetricType::Tag => "tag",
        }
    }
}

/// Kind of saved or ad-hoc report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// Conversion funnel.
    Funnel,
    /// Cohort retention.
    Retention,
    /// UTM campaign breakdown.
    Utm,
    /// Goal completion.
    Goals,
    /// Segment insights.
    Insights,
    /// Revenue.
    Revenue,
    /// User journeys.
    Journey,
}

impl ReportType {
    /// The path segment and body value for this report type.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Funnel => "funnel",
            ReportType::Retention => "retention",
            ReportType::Utm => "utm",
            ReportType::Goals => "goals",
            ReportType::Insights => "insights",
            ReportType::Revenue => "revenue",
            ReportType::Journey => "journey",
        }
    }
}
