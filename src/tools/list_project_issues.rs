use super::operation::{OperationResult, non_empty};
use crate::api_client::{IssuesQuery, SentryApi};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListProjectIssuesInput {
    #[schemars(description = "Project slug")]
    pub project_slug: String,
    #[schemars(description = "Organization slug (defaults to the configured organization)")]
    pub organization_slug: Option<String>,
    #[schemars(
        description = "Sentry search query, e.g. 'is:unresolved level:error' or \
        'environment:production'"
    )]
    pub query: Option<String>,
    #[schemars(description = "Stats period such as '24h', '14d' or '' to disable stats")]
    pub stats_period: Option<String>,
    #[schemars(description = "Pagination cursor returned by a previous call")]
    pub cursor: Option<String>,
}

pub async fn execute(
    client: &dyn SentryApi,
    default_org: &str,
    input: ListProjectIssuesInput,
) -> Result<CallToolResult, McpError> {
    if input.project_slug.is_empty() {
        return Err(McpError::invalid_params(
            "project_slug is required and must be a non-empty string",
            None,
        ));
    }
    let org_slug = non_empty(input.organization_slug.as_deref()).unwrap_or(default_org);
    let query = IssuesQuery::new(input.query, input.stats_period, input.cursor);
    let result = client
        .list_project_issues(org_slug, &input.project_slug, &query)
        .await
        .map(|page| {
            let pagination = page.cursors();
            json!({
                "issues": page.issues,
                "pagination": pagination,
            })
        });
    Ok(OperationResult::from_upstream(result).into())
}
