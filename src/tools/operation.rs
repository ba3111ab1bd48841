use super::fetch_event::{self, FetchEventInput};
use super::fetch_issue::{self, FetchIssueInput};
use super::list_project_issues::{self, ListProjectIssuesInput};
use super::list_projects;
use crate::api_client::SentryApi;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde_json::Value;

#[derive(Debug)]
pub enum Operation {
    FetchIssue(FetchIssueInput),
    ListProjects,
    ListProjectIssues(ListProjectIssuesInput),
    FetchEvent(FetchEventInput),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FetchIssue(_) => "fetch_issue",
            Operation::ListProjects => "list_projects",
            Operation::ListProjectIssues(_) => "list_project_issues",
            Operation::FetchEvent(_) => "fetch_event",
        }
    }

    /// Runs the operation. Invalid arguments surface as `Err` before any
    /// request is made; upstream failures come back as an error-flagged
    /// result.
    pub async fn execute(
        self,
        client: &dyn SentryApi,
        default_org: &str,
    ) -> Result<CallToolResult, McpError> {
        match self {
            Operation::FetchIssue(input) => fetch_issue::execute(client, input).await,
            Operation::ListProjects => list_projects::execute(client).await,
            Operation::ListProjectIssues(input) => {
                list_project_issues::execute(client, default_org, input).await
            }
            Operation::FetchEvent(input) => fetch_event::execute(client, default_org, input).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Success(Value),
    Failure(String),
}

impl OperationResult {
    pub fn from_upstream(result: anyhow::Result<Value>) -> Self {
        match result {
            Ok(payload) => OperationResult::Success(payload),
            Err(e) => OperationResult::Failure(e.to_string()),
        }
    }

    pub fn into_call_tool_result(self) -> CallToolResult {
        match self {
            OperationResult::Success(payload) => match serde_json::to_string_pretty(&payload) {
                Ok(text) => CallToolResult::success(vec![Content::text(text)]),
                Err(e) => CallToolResult::error(vec![Content::text(format!(
                    "Failed to serialize response: {}",
                    e
                ))]),
            },
            OperationResult::Failure(message) => {
                CallToolResult::error(vec![Content::text(message)])
            }
        }
    }
}

impl From<OperationResult> for CallToolResult {
    fn from(result: OperationResult) -> Self {
        result.into_call_tool_result()
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
