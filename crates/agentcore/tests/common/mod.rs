//! Common test utilities for CLI integration tests
#![allow(dead_code)]

use assert_cmd::Command;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

use agentcore_agent::{Agent, AppState, ToolClient};
use agentcore_tools::ToolStore;

/// Isolated HOME with no config file and no runtime ARNs in the environment
pub struct TestEnv {
    pub temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            temp_dir: tempdir()?,
        })
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_agentcore"));
        cmd.env("HOME", self.temp_dir.path());
        for key in [
            "MCP_RUNTIME_ARN",
            "AGENT_RUNTIME_ARN",
            "AWS_REGION",
            "MCP_BASE_URL",
            "MCP_TIMEOUT_SECS",
            "HOST",
            "PORT",
            "RUST_LOG",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Write `~/.agentcore-poc/config.json`
    pub fn write_config(&self, content: &str) -> anyhow::Result<()> {
        let dir = self.temp_dir.path().join(".agentcore-poc");
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("config.json"), content)?;
        Ok(())
    }
}

/// Tool server and front-end running on a background runtime
pub struct Servers {
    pub tools: SocketAddr,
    pub frontend: SocketAddr,
    _runtime: tokio::runtime::Runtime,
}

impl Servers {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (tools, frontend) = runtime.block_on(async {
            let tools_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let tools = tools_listener.local_addr().unwrap();
            let app = agentcore_tools::router(Arc::new(ToolStore::seeded()));
            tokio::spawn(async move { axum::serve(tools_listener, app).await });

            let client =
                ToolClient::http(format!("http://{}", tools), Duration::from_secs(5)).unwrap();
            let state = Arc::new(AppState::new(Agent::new(client)));
            let front_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let frontend = front_listener.local_addr().unwrap();
            let app = agentcore_agent::app_router(state);
            tokio::spawn(async move { axum::serve(front_listener, app).await });

            (tools, frontend)
        });

        Self {
            tools,
            frontend,
            _runtime: runtime,
        }
    }
}

/// A port nothing listens on
pub fn dead_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
