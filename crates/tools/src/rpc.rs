//! JSON-RPC call surface
//!
//! Supports `initialize`, `tools/list` and `tools/call`. Anything that goes
//! wrong while executing a call is reported as `-32603`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::store::ToolStore;
use crate::tool::{Tool, ToolCall};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INTERNAL_ERROR: i64 = -32603;

pub const PROTOCOL_VERSION: &str = "2025-06-18";
pub const SERVER_NAME: &str = "mcp-server";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl RpcRequest {
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params: Some(params),
            id: Some(id.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

impl RpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data: None,
            }),
            id,
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::error(None, PARSE_ERROR, message)
    }

    pub fn invalid_request(id: Option<Value>, message: impl Into<String>) -> Self {
        Self::error(id, INVALID_REQUEST, message)
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn internal_error(id: Option<Value>, message: impl Into<String>) -> Self {
        Self::error(id, INTERNAL_ERROR, message)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Dispatch one request against the store
pub fn handle_rpc(store: &ToolStore, request: RpcRequest) -> RpcResponse {
    debug!(method = %request.method, "Received JSON-RPC request");

    if request.jsonrpc != "2.0" {
        return RpcResponse::invalid_request(
            request.id,
            "Unsupported jsonrpc version (expected 2.0)",
        );
    }

    match request.method.as_str() {
        "initialize" => RpcResponse::success(request.id, initialize_result()),
        "tools/list" => RpcResponse::success(request.id, tools_list_result()),
        "tools/call" => handle_tool_call(store, request.id, request.params),
        other => {
            warn!(method = other, "Unknown JSON-RPC method");
            RpcResponse::method_not_found(request.id, other)
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": { "tools": {} },
    })
}

fn tools_list_result() -> Value {
    let tools: Vec<_> = Tool::ALL.iter().map(Tool::definition).collect();
    json!({ "tools": tools })
}

fn handle_tool_call(store: &ToolStore, id: Option<Value>, params: Option<Value>) -> RpcResponse {
    let params = params.unwrap_or(Value::Null);
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return RpcResponse::internal_error(id, "tools/call requires params.name");
    };

    let tool = match name.parse::<Tool>() {
        Ok(tool) => tool,
        Err(e) => {
            warn!(tool = name, "Unknown tool requested");
            return RpcResponse::error(id, METHOD_NOT_FOUND, e.to_string());
        }
    };

    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
    match ToolCall::from_arguments(tool, arguments) {
        Ok(call) => {
            debug!(tool = %tool, "Executing tool");
            RpcResponse::success(id, call.execute(store))
        }
        Err(e) => RpcResponse::internal_error(id, e.to_string()),
    }
}
