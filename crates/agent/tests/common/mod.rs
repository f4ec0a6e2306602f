//! Shared helpers for front-end integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use agentcore_agent::{Agent, ToolClient};
use agentcore_tools::ToolStore;

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Start a tool server on an ephemeral port and return its base URL
pub async fn spawn_tool_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = agentcore_tools::router(Arc::new(ToolStore::seeded()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A server that accepts connections and never answers
pub async fn spawn_silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

pub fn http_agent(base_url: &str) -> Agent {
    Agent::new(ToolClient::http(base_url, TIMEOUT).unwrap())
}
