//! Agent front-end
//!
//! Matches free-text prompts against two fixed patterns, calls the order or
//! FAQ tool over HTTP or through a hosted runtime, and renders the reply.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub mod agent;
pub mod bridge;
pub mod client;
pub mod invoker;
pub mod reply;
pub mod router;
pub mod server;
pub mod session;

pub use agent::{extract_prompt, Agent, InvocationResponse, ToolCallReport};
pub use bridge::{unwrap_reply, BridgeClient};
pub use client::{error_payload, HttpToolClient, ToolClient, ERROR_FIELD};
pub use invoker::{HttpInvoker, RuntimeInvoker, RuntimeReply};
pub use router::{route, RoutingDecision};
pub use server::{router as app_router, serve, AppState};
pub use session::SessionContext;

#[cfg(feature = "agentcore")]
pub use invoker::AgentCoreInvoker;

/// Failure of a single tool call
#[derive(Error, Debug)]
pub enum CallError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("tool server returned HTTP {0}")]
    Status(u16),

    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("remote invocation failed: {0}")]
    Invoke(String),

    #[error("{0}")]
    Remote(String),
}

/// Front-end setup and serving errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("MCP_RUNTIME_ARN is set but this build lacks the `agentcore` feature")]
    AgentCoreUnavailable,

    #[error("tool client setup failed: {0}")]
    Client(#[from] CallError),

    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(std::io::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;
