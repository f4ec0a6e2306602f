//! Bridge envelope
//!
//! Minimal request wrapper used when a tool call is forwarded through a
//! hosted runtime instead of a direct HTTP request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::store::ToolStore;
use crate::tool::{Tool, ToolCall};

/// Header carrying the runtime session id over plain HTTP
pub const SESSION_HEADER: &str = "x-amzn-bedrock-agentcore-runtime-session-id";

pub const TOOL_CALL_TYPE: &str = "tool_call";
pub const TOOL_RESULT_TYPE: &str = "tool_result";

/// Outbound tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolEnvelope {
    /// Wrap a call under a fresh request id
    pub fn new(call: &ToolCall) -> Self {
        Self {
            kind: TOOL_CALL_TYPE.to_string(),
            id: uuid::Uuid::new_v4().to_string(),
            tool: call.tool().name().to_string(),
            arguments: call.arguments(),
        }
    }

    pub fn is_tool_call(value: &Value) -> bool {
        value.get("type").and_then(Value::as_str) == Some(TOOL_CALL_TYPE)
    }
}

/// Reply produced by the tool server for an envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeReply {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EnvelopeReply {
    /// Execute the envelope's tool call against `store`
    pub fn answer(store: &ToolStore, envelope: ToolEnvelope) -> Self {
        let outcome = envelope
            .tool
            .parse::<Tool>()
            .and_then(|tool| ToolCall::from_arguments(tool, envelope.arguments));

        match outcome {
            Ok(call) => {
                debug!(id = %envelope.id, tool = %call.tool(), "Answering envelope");
                Self {
                    kind: TOOL_RESULT_TYPE.to_string(),
                    id: envelope.id,
                    result: Some(call.execute(store)),
                    error: None,
                }
            }
            Err(e) => Self {
                kind: TOOL_RESULT_TYPE.to_string(),
                id: envelope.id,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}
