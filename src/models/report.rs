//! Report request bodies.

use serde::Serialize;
use serde_json::{Map, Value};

use super::ReportType;

/// Body for saving a new report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportBody {
    /// Website the report belongs to.
    pub website_id: String,

    /// Report name.
    pub name: String,

    /// Report type.
    #[serde(rename = "type")]
    pub report_type: ReportType,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Type-specific parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

/// Builds the body for running a report: `websiteId` merged with the
/// report parameters. A `websiteId` inside `parameters` takes precedence.
pub fn run_report_body(website_id: &str, parameters: Map<String, Value>) -> Value {
    let mut body = Map::new();
    body.insert("websiteId".to_string(), Value::String(website_id.to_string()));
    body.extend(parameters);
    Value::Object(body)
}
