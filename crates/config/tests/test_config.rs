//! Tests for Config defaults, file loading and transport selection

use agentcore_config::{Config, TransportMode};
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

/// Helper to create a temporary directory for tests
fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.frontend.host, "0.0.0.0");
    assert_eq!(config.frontend.port, 8080);
    assert_eq!(config.tools.port, 8000);
    assert_eq!(config.tools.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.tools.timeout_secs, 5);
    assert_eq!(config.remote.region, "us-east-1");
    assert!(config.remote.runtime_arn.is_none());
    assert!(config.remote.agent_runtime_arn.is_none());
}

#[test]
fn test_transport_defaults_to_http() {
    let config = Config::default();
    assert_eq!(config.transport_mode(), TransportMode::Http);
    assert_eq!(config.transport_mode().to_string(), "http");
}

#[test]
fn test_transport_agentcore_when_arn_set() {
    let mut config = Config::default();
    config.remote.runtime_arn =
        Some("arn:aws:bedrock-agentcore:us-east-1:123456789012:runtime/mcp".to_string());
    assert_eq!(config.transport_mode(), TransportMode::AgentCore);
    assert_eq!(config.transport_mode().as_str(), "agentcore");
}

#[test]
fn test_addresses_and_timeout() {
    let config = Config::default();
    assert_eq!(config.frontend_addr(), "0.0.0.0:8080");
    assert_eq!(config.tools_addr(), "0.0.0.0:8000");
    assert_eq!(config.tool_timeout(), Duration::from_secs(5));
}

#[test]
fn test_env_overlay() {
    let mut config = Config::default();
    config
        .apply_env_from(lookup(&[
            ("MCP_RUNTIME_ARN", "arn:mcp"),
            ("AGENT_RUNTIME_ARN", "arn:agent"),
            ("AWS_REGION", "eu-west-1"),
            ("MCP_BASE_URL", "http://tools.local:9000/"),
            ("MCP_TIMEOUT_SECS", "2"),
            ("PORT", "9090"),
        ]))
        .unwrap();

    assert_eq!(config.remote.runtime_arn.as_deref(), Some("arn:mcp"));
    assert_eq!(config.remote.agent_runtime_arn.as_deref(), Some("arn:agent"));
    assert_eq!(config.remote.region, "eu-west-1");
    assert_eq!(config.tools.base_url, "http://tools.local:9000");
    assert_eq!(config.tools.timeout_secs, 2);
    assert_eq!(config.frontend.port, 9090);
    assert_eq!(config.transport_mode(), TransportMode::AgentCore);
}

#[test]
fn test_env_overlay_ignores_empty_values() {
    let mut config = Config::default();
    config
        .apply_env_from(lookup(&[("MCP_RUNTIME_ARN", "  "), ("AWS_REGION", "")]))
        .unwrap();

    assert!(config.remote.runtime_arn.is_none());
    assert_eq!(config.remote.region, "us-east-1");
}

#[test]
fn test_env_overlay_rejects_bad_port() {
    let mut config = Config::default();
    let err = config
        .apply_env_from(lookup(&[("PORT", "eighty")]))
        .unwrap_err();

    let display = err.to_string();
    assert!(display.contains("PORT"));
    assert!(display.contains("eighty"));
}

#[tokio::test]
async fn test_load_missing_file_uses_defaults() {
    let dir = temp_dir();
    let config = Config::load_from(&dir.path().join("missing.json"))
        .await
        .unwrap();
    assert_eq!(config.frontend.port, 8080);
}

#[tokio::test]
async fn test_load_partial_file_fills_defaults() {
    let dir = temp_dir();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"tools": {"base_url": "http://mcp:8000"}}"#).unwrap();

    let config = Config::load_from(&path).await.unwrap();
    assert_eq!(config.tools.base_url, "http://mcp:8000");
    assert_eq!(config.tools.timeout_secs, 5);
    assert_eq!(config.frontend.port, 8080);
}

#[tokio::test]
async fn test_save_and_load_preserves_remote() {
    let dir = temp_dir();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.remote.runtime_arn = Some("arn:mcp".to_string());
    config.save_to(&path).await.unwrap();

    let loaded = Config::load_from(&path).await.unwrap();
    assert_eq!(loaded.remote.runtime_arn.as_deref(), Some("arn:mcp"));
    assert_eq!(loaded.transport_mode(), TransportMode::AgentCore);
}

#[tokio::test]
async fn test_load_invalid_json_fails() {
    let dir = temp_dir();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).await.is_err());
}
