use crate::config::Config;
use crate::pagination::{Cursors, parse_link_header};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use url::Url;

#[async_trait]
pub trait SentryApi: Send + Sync {
    async fn get_issue(&self, issue_id: &str) -> anyhow::Result<Value>;
    async fn list_projects(&self) -> anyhow::Result<Value>;
    async fn list_project_issues(
        &self,
        org_slug: &str,
        project_slug: &str,
        query: &IssuesQuery,
    ) -> anyhow::Result<IssuesPage>;
    async fn get_event(
        &self,
        org_slug: &str,
        project_slug: &str,
        event_id: &str,
    ) -> anyhow::Result<Value>;
}

pub struct SentryApiClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(rename = "statsPeriod", skip_serializing_if = "Option::is_none")]
    pub stats_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl IssuesQuery {
    pub fn new(
        query: Option<String>,
        stats_period: Option<String>,
        cursor: Option<String>,
    ) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            query: non_empty(query),
            stats_period: non_empty(stats_period),
            cursor: non_empty(cursor),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuesPage {
    pub issues: Value,
    pub link: Option<String>,
}

impl IssuesPage {
    pub fn cursors(&self) -> Cursors {
        parse_link_header(self.link.as_deref())
    }
}

pub fn describe_failure(status: StatusCode, body: &str) -> String {
    let body = match serde_json::from_str::<Value>(body) {
        Ok(json) => json.to_string(),
        Err(_) => body.trim().to_string(),
    };
    if body.is_empty() {
        format!("Sentry API error: {}", status)
    } else {
        format!("Sentry API error: {} - {}", status, body)
    }
}

impl SentryApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", config.auth_token))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let mut builder = Client::builder().default_headers(headers);
        if let Some(proxy_url) = &config.socks_proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else if let Some(proxy_url) = &config.https_proxy {
            builder = builder.proxy(reqwest::Proxy::https(proxy_url)?);
        }
        let client = builder.build()?;
        let base_url = Url::parse(&config.api_base_url())?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    async fn get(&self, url: Url) -> anyhow::Result<reqwest::Response> {
        info!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Sentry API request failed: {}", e))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("{}", describe_failure(status, &text));
        }
        Ok(resp)
    }

    async fn read_json(resp: reqwest::Response) -> anyhow::Result<Value> {
        let text = resp
            .text()
            .await
            .map_err(|e| anyhow::anyhow!("Sentry API request failed: {}", e))?;
        serde_json::from_str(&text).map_err(|e| {
            let excerpt: String = text.chars().take(500).collect();
            error!("Failed to parse Sentry JSON: {}. Response: {}", e, excerpt);
            anyhow::anyhow!("JSON parse error: {}", e)
        })
    }
}

#[async_trait]
impl SentryApi for SentryApiClient {
    async fn get_issue(&self, issue_id: &str) -> anyhow::Result<Value> {
        let url = self.endpoint(&["issues", issue_id])?;
        Self::read_json(self.get(url).await?).await
    }
    async fn list_projects(&self) -> anyhow::Result<Value> {
        let url = self.endpoint(&["projects"])?;
        Self::read_json(self.get(url).await?).await
    }
    async fn list_project_issues(
        &self,
        org_slug: &str,
        project_slug: &str,
        query: &IssuesQuery,
    ) -> anyhow::Result<IssuesPage> {
        let mut url = self.endpoint(&["projects", org_slug, project_slug, "issues"])?;
        let query_string = serde_qs::to_string(query)?;
        if !query_string.is_empty() {
            url.set_query(Some(&query_string));
        }
        let resp = self.get(url).await?;
        let link = resp
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let issues = Self::read_json(resp).await?;
        Ok(IssuesPage { issues, link })
    }
    async fn get_event(
        &self,
        org_slug: &str,
        project_slug: &str,
        event_id: &str,
    ) -> anyhow::Result<Value> {
        let url = self.endpoint(&["projects", org_slug, project_slug, "events", event_id])?;
        Self::read_json(self.get(url).await?).await
    }
}
