//! Tool server for the AgentCore POC
//!
//! Two read-only tools (`order_lookup`, `kb_search`) over fixed in-memory
//! data, reachable through a JSON-RPC-style `/mcp` endpoint, the bridge
//! envelope, and plain debug GET routes.

use thiserror::Error;

pub mod envelope;
pub mod rpc;
pub mod server;
pub mod store;
pub mod tool;

pub use envelope::{EnvelopeReply, ToolEnvelope, SESSION_HEADER};
pub use rpc::{handle_rpc, RpcError, RpcRequest, RpcResponse};
pub use server::{router, serve, ServerError};
pub use store::{FaqEntry, OrderLookup, OrderRecord, ToolStore, DEFAULT_TOP_K};
pub use tool::{Tool, ToolCall, ToolDefinition};

/// Tool dispatch errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ToolError>;
