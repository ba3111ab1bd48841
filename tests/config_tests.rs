use sentry_issues_mcp::config::{Config, ConfigError, DEFAULT_BASE_URL};
use std::collections::HashMap;

fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let map: HashMap<&str, &str> = vars.iter().copied().collect();
    Config::from_lookup(|key| map.get(key).map(|v| v.to_string()))
}

const REQUIRED: [(&str, &str); 3] = [
    ("AUTH_TOKEN", "sntrys_token"),
    ("ORG_SLUG", "acme"),
    ("PROJECT_NAMES", "web, api ,worker"),
];

#[test]
fn test_required_variables_only() {
    let config = load(&REQUIRED).unwrap();
    assert_eq!(config.auth_token, "sntrys_token");
    assert_eq!(config.org_slug, "acme");
    assert_eq!(config.project_names, vec!["web", "api", "worker"]);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api_base_url(), "https://sentry.io/api/0");
    assert!(config.socks_proxy.is_none());
    assert!(config.https_proxy.is_none());
}

#[test]
fn test_custom_base_url() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("BASE_URL", "https://sentry.internal.example.com"));
    let config = load(&vars).unwrap();
    assert_eq!(
        config.api_base_url(),
        "https://sentry.internal.example.com/api/0"
    );
}

#[test]
fn test_each_required_variable_is_checked() {
    for missing in ["AUTH_TOKEN", "ORG_SLUG", "PROJECT_NAMES"] {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != missing)
            .collect();
        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing(missing));
    }
}

#[test]
fn test_empty_value_counts_as_missing() {
    let vars = [
        ("AUTH_TOKEN", ""),
        ("ORG_SLUG", "acme"),
        ("PROJECT_NAMES", "web"),
    ];
    let err = load(&vars).unwrap_err();
    assert_eq!(err.to_string(), "AUTH_TOKEN environment variable is required");
}

#[test]
fn test_socks_proxy_lowercase_fallback() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("socks_proxy", "socks5://127.0.0.1:1080"));
    vars.push(("HTTPS_PROXY", "http://proxy:3128"));
    let config = load(&vars).unwrap();
    assert_eq!(config.socks_proxy.as_deref(), Some("socks5://127.0.0.1:1080"));
    assert_eq!(config.https_proxy.as_deref(), Some("http://proxy:3128"));
}
