//! Configuration management for the AgentCore POC
//!
//! Settings are read from `~/.agentcore-poc/config.json` when present and then
//! overlaid with environment variables, which is how the container runtime
//! hands over remote endpoint identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub mod paths;

pub use paths::{config_path, data_dir};

/// Environment variable naming the MCP tool runtime ARN
pub const ENV_MCP_RUNTIME_ARN: &str = "MCP_RUNTIME_ARN";
/// Environment variable naming the agent runtime ARN used by `invoke`
pub const ENV_AGENT_RUNTIME_ARN: &str = "AGENT_RUNTIME_ARN";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_MCP_BASE_URL: &str = "MCP_BASE_URL";
pub const ENV_MCP_TIMEOUT_SECS: &str = "MCP_TIMEOUT_SECS";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

/// Errors in configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How the front-end reaches the tool server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Plain HTTP GET against the tool server's debug endpoints
    Http,
    /// Bedrock AgentCore `InvokeAgentRuntime` against a hosted MCP runtime
    AgentCore,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Http => "http",
            TransportMode::AgentCore => "agentcore",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Front-end HTTP listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_frontend_port")]
    pub port: u16,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_frontend_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_frontend_port() -> u16 {
    8080
}

/// Tool server listener and the URL the front-end uses to reach it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_tools_port")]
    pub port: u16,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_tools_port(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_tools_port() -> u16 {
    8000
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

/// Hosted runtime identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_runtime_arn: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            runtime_arn: None,
            agent_runtime_arn: None,
            region: default_region(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub tools: ToolServerConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Config {
    /// Load from the default location, then apply the process environment
    pub async fn load() -> Result<Self> {
        let path = config_path();
        let mut config = Self::load_from(&path).await?;
        config.apply_env()?;
        Ok(config)
    }

    /// Load from specific location
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config found at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        debug!("Reading config from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to specific location
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        debug!("Writing config to {:?}", path);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup. Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(arn) = get(ENV_MCP_RUNTIME_ARN) {
            self.remote.runtime_arn = Some(arn);
        }
        if let Some(arn) = get(ENV_AGENT_RUNTIME_ARN) {
            self.remote.agent_runtime_arn = Some(arn);
        }
        if let Some(region) = get(ENV_AWS_REGION) {
            self.remote.region = region;
        }
        if let Some(url) = get(ENV_MCP_BASE_URL) {
            self.tools.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = get(ENV_MCP_TIMEOUT_SECS) {
            self.tools.timeout_secs = parse_value(ENV_MCP_TIMEOUT_SECS, &secs)?;
        }
        if let Some(host) = get(ENV_HOST) {
            self.frontend.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.frontend.port = parse_value(ENV_PORT, &port)?;
        }
        Ok(())
    }

    /// Transport the front-end should use for tool calls
    pub fn transport_mode(&self) -> TransportMode {
        if self.remote.runtime_arn.is_some() {
            TransportMode::AgentCore
        } else {
            TransportMode::Http
        }
    }

    /// Outbound HTTP timeout for tool calls
    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tools.timeout_secs)
    }

    pub fn frontend_addr(&self) -> String {
        format!("{}:{}", self.frontend.host, self.frontend.port)
    }

    pub fn tools_addr(&self) -> String {
        format!("{}:{}", self.tools.host, self.tools.port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}
