use super::operation::{OperationResult, non_empty};
use crate::api_client::SentryApi;
use regex::Regex;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::LazyLock;

static EVENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-f0-9]{32}$").expect("event id pattern is valid"));

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FetchEventInput {
    #[schemars(description = "Project slug")]
    pub project_slug: String,
    #[schemars(description = "Event ID (32-character hex string)")]
    pub event_id: String,
    #[schemars(description = "Organization slug (defaults to the configured organization)")]
    pub organization_slug: Option<String>,
}

pub fn is_valid_event_id(event_id: &str) -> bool {
    EVENT_ID_RE.is_match(event_id)
}

pub async fn execute(
    client: &dyn SentryApi,
    default_org: &str,
    input: FetchEventInput,
) -> Result<CallToolResult, McpError> {
    if input.project_slug.is_empty() {
        return Err(McpError::invalid_params(
            "project_slug is required and must be a non-empty string",
            None,
        ));
    }
    if !is_valid_event_id(&input.event_id) {
        return Err(McpError::invalid_params(
            format!(
                "Invalid event_id: '{}'. Expected a 32-character hexadecimal string",
                input.event_id
            ),
            None,
        ));
    }
    let org_slug = non_empty(input.organization_slug.as_deref()).unwrap_or(default_org);
    let result = client
        .get_event(org_slug, &input.project_slug, &input.event_id)
        .await;
    Ok(OperationResult::from_upstream(result).into())
}
