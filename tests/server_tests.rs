use async_trait::async_trait;
use rmcp::model::{CallToolRequestParam, ErrorCode};
use rmcp::service::RunningService;
use rmcp::{RoleClient, ServiceError, ServiceExt};
use sentry_issues_mcp::api_client::{IssuesPage, IssuesQuery, SentryApi};
use sentry_issues_mcp::config::Config;
use sentry_issues_mcp::tools::SentryTools;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingClient {
    calls: AtomicUsize,
}

impl CountingClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
    fn hit(&self) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"ok": true}))
    }
}

#[async_trait]
impl SentryApi for CountingClient {
    async fn get_issue(&self, _issue_id: &str) -> anyhow::Result<Value> {
        self.hit()
    }
    async fn list_projects(&self) -> anyhow::Result<Value> {
        self.hit()
    }
    async fn list_project_issues(
        &self,
        _org_slug: &str,
        _project_slug: &str,
        _query: &IssuesQuery,
    ) -> anyhow::Result<IssuesPage> {
        Ok(IssuesPage {
            issues: self.hit()?,
            link: None,
        })
    }
    async fn get_event(
        &self,
        _org_slug: &str,
        _project_slug: &str,
        _event_id: &str,
    ) -> anyhow::Result<Value> {
        self.hit()
    }
}

fn test_config() -> Config {
    Config {
        auth_token: "test-token".to_string(),
        org_slug: "test-org".to_string(),
        project_names: vec!["web".to_string()],
        base_url: "https://sentry.io".to_string(),
        socks_proxy: None,
        https_proxy: None,
    }
}

async fn connect(api: Arc<CountingClient>) -> RunningService<RoleClient, ()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server = SentryTools::with_client(test_config(), api);
    tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        anyhow::Ok(())
    });
    ().serve(client_transport).await.unwrap()
}

fn request(name: &'static str, arguments: Value) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.into(),
        arguments: arguments.as_object().cloned(),
    }
}

fn error_code(err: ServiceError) -> (ErrorCode, String) {
    match err {
        ServiceError::McpError(data) => (data.code, data.message.to_string()),
        other => panic!("Expected MCP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_tool_is_method_not_found() {
    let api = CountingClient::new();
    let client = connect(api.clone()).await;
    let err = client
        .call_tool(request("delete_everything", json!({})))
        .await
        .unwrap_err();
    let (code, message) = error_code(err);
    assert_eq!(code, ErrorCode::METHOD_NOT_FOUND);
    assert!(message.contains("delete_everything"));
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    client.cancel().await.unwrap();
}

#[tokio::test]
async fn test_bad_event_id_is_invalid_params() {
    let api = CountingClient::new();
    let client = connect(api.clone()).await;
    let err = client
        .call_tool(request(
            "fetch_event",
            json!({"project_slug": "web", "event_id": "abc"}),
        ))
        .await
        .unwrap_err();
    let (code, message) = error_code(err);
    assert_eq!(code, ErrorCode::INVALID_PARAMS);
    assert!(message.contains("abc"));
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    client.cancel().await.unwrap();
}

#[tokio::test]
async fn test_missing_project_slug_is_invalid_params() {
    let api = CountingClient::new();
    let client = connect(api.clone()).await;
    let err = client
        .call_tool(request("list_project_issues", json!({"query": "is:unresolved"})))
        .await
        .unwrap_err();
    assert_eq!(error_code(err).0, ErrorCode::INVALID_PARAMS);
    let err = client
        .call_tool(request("list_project_issues", json!({"project_slug": ""})))
        .await
        .unwrap_err();
    assert_eq!(error_code(err).0, ErrorCode::INVALID_PARAMS);
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    client.cancel().await.unwrap();
}

#[tokio::test]
async fn test_known_tools_are_listed_and_callable() {
    let api = CountingClient::new();
    let client = connect(api.clone()).await;
    let tools = client.list_all_tools().await.unwrap();
    let mut names: Vec<String> = tools.iter().map(|t| t.name.to_string()).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["fetch_event", "fetch_issue", "list_project_issues", "list_projects"]
    );
    let result = client
        .call_tool(request("list_projects", json!({})))
        .await
        .unwrap();
    assert!(!result.is_error.unwrap_or(false));
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    client.cancel().await.unwrap();
}

#[tokio::test]
async fn test_server_info_does_not_advertise_list_changes() {
    let client = connect(CountingClient::new()).await;
    let info = client.peer_info().unwrap();
    let tools = info.capabilities.tools.clone().unwrap();
    assert_ne!(tools.list_changed, Some(true));
    assert_eq!(info.server_info.name, "sentry-issues-mcp");
    client.cancel().await.unwrap();
}
