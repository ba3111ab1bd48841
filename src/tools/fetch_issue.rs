use super::operation::OperationResult;
use crate::api_client::SentryApi;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FetchIssueInput {
    #[schemars(
        description = "Numeric Sentry issue ID (e.g. '6380454530') or a full issue URL \
        (e.g. 'https://my-org.sentry.io/issues/6380454530/')"
    )]
    pub issue_id_or_url: String,
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Extracts a numeric issue ID from either a bare ID or an issue URL. URLs
/// must contain an `issues` path segment directly followed by the ID.
pub fn parse_issue_id(input: &str) -> Option<String> {
    if input.starts_with("http://") || input.starts_with("https://") {
        let url = Url::parse(input).ok()?;
        let mut segments = url.path_segments()?;
        segments.find(|s| *s == "issues")?;
        let id = segments.next()?;
        return is_digits(id).then(|| id.to_string());
    }
    is_digits(input).then(|| input.to_string())
}

pub async fn execute(
    client: &dyn SentryApi,
    input: FetchIssueInput,
) -> Result<CallToolResult, McpError> {
    let issue_id = parse_issue_id(&input.issue_id_or_url).ok_or_else(|| {
        McpError::invalid_params(
            format!(
                "Invalid issue ID or URL format: '{}'. Expected a numeric issue ID or a Sentry \
                 issue URL containing /issues/<id>/",
                input.issue_id_or_url
            ),
            None,
        )
    })?;
    Ok(OperationResult::from_upstream(client.get_issue(&issue_id).await).into())
}
