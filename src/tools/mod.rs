pub mod fetch_event;
pub mod fetch_issue;
pub mod list_project_issues;
pub mod list_projects;
pub mod operation;

use crate::api_client::{SentryApi, SentryApiClient};
use crate::config::Config;
use fetch_event::FetchEventInput;
use fetch_issue::FetchIssueInput;
use list_project_issues::ListProjectIssuesInput;
use operation::Operation;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool_router,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct SentryTools {
    client: Arc<dyn SentryApi>,
    config: Arc<Config>,
    tool_router: ToolRouter<SentryTools>,
}

#[tool_router]
impl SentryTools {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = SentryApiClient::new(&config)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }
    pub fn with_client(config: Config, client: Arc<dyn SentryApi>) -> Self {
        Self {
            client,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }
    async fn run(&self, operation: Operation) -> Result<CallToolResult, McpError> {
        info!("{}: {:?}", operation.name(), operation);
        operation
            .execute(&*self.client, &self.config.org_slug)
            .await
    }
    #[rmcp::tool(
        description = "Fetch a Sentry issue by numeric ID or by issue URL. Returns the raw issue JSON."
    )]
    async fn fetch_issue(
        &self,
        Parameters(input): Parameters<FetchIssueInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::FetchIssue(input)).await
    }
    #[rmcp::tool(description = "List all Sentry projects visible to the configured token.")]
    async fn list_projects(&self) -> Result<CallToolResult, McpError> {
        self.run(Operation::ListProjects).await
    }
    #[rmcp::tool(
        description = "List issues for a Sentry project, optionally filtered by a search query and stats period. Returns the issues plus 'next'/'prev' pagination cursors."
    )]
    async fn list_project_issues(
        &self,
        Parameters(input): Parameters<ListProjectIssuesInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::ListProjectIssues(input)).await
    }
    #[rmcp::tool(description = "Fetch a single Sentry event of a project by its 32-character event ID.")]
    async fn fetch_event(
        &self,
        Parameters(input): Parameters<FetchEventInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::FetchEvent(input)).await
    }
}

impl ServerHandler for SentryTools {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if !self.tool_router.has_route(&request.name) {
            return Err(McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("Unknown tool: {}", request.name),
                None,
            ));
        }
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tool_router.list_all()))
    }
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: None,
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "sentry-issues-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Read-only access to Sentry organization '{}'. Known projects: {}.",
                self.config.org_slug,
                self.config.project_names.join(", ")
            )),
            ..Default::default()
        }
    }
}
