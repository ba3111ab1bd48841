use super::operation::OperationResult;
use crate::api_client::SentryApi;
use rmcp::{ErrorData as McpError, model::CallToolResult};

pub async fn execute(client: &dyn SentryApi) -> Result<CallToolResult, McpError> {
    Ok(OperationResult::from_upstream(client.list_projects().await).into())
}
