use std::env;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://sentry.io";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

/// Startup settings, read once from the environment and never mutated.
#[derive(Clone)]
pub struct Config {
    pub auth_token: String,
    pub org_slug: String,
    /// Informational only; tool calls may target any project.
    pub project_names: Vec<String>,
    pub base_url: String,
    pub socks_proxy: Option<String>,
    pub https_proxy: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let auth_token = require("AUTH_TOKEN")?;
        let org_slug = require("ORG_SLUG")?;
        let project_names = require("PROJECT_NAMES")?
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        let base_url = get("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            auth_token,
            org_slug,
            project_names,
            base_url,
            socks_proxy: get("SOCKS_PROXY").or_else(|| get("socks_proxy")),
            https_proxy: get("HTTPS_PROXY").or_else(|| get("https_proxy")),
        })
    }

    /// Root of the versioned REST API, e.g. `https://sentry.io/api/0`.
    pub fn api_base_url(&self) -> String {
        format!("{}/api/0", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("auth_token", &"<redacted>")
            .field("org_slug", &self.org_slug)
            .field("project_names", &self.project_names)
            .field("base_url", &self.base_url)
            .field("socks_proxy", &self.socks_proxy)
            .field("https_proxy", &self.https_proxy)
            .finish()
    }
}
