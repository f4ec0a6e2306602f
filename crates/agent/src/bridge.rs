//! Remote-invocation bridge
//!
//! Wraps a tool call in a [`ToolEnvelope`], forwards it through a
//! [`RuntimeInvoker`] and unwraps whatever the runtime sent back.
//!
//! Hosted runtimes have been seen answering with any of `result`, `error`,
//! `data` or `outputs`. They are checked in exactly that order.

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use agentcore_tools::{ToolCall, ToolEnvelope};

use crate::invoker::RuntimeInvoker;
use crate::session::SessionContext;
use crate::CallError;

const REPLY_FIELDS: [&str; 4] = ["result", "error", "data", "outputs"];

pub struct BridgeClient {
    invoker: Box<dyn RuntimeInvoker>,
    timeout: Duration,
}

impl BridgeClient {
    /// `timeout` bounds each invocation, including reading the reply body
    pub fn new(invoker: Box<dyn RuntimeInvoker>, timeout: Duration) -> Self {
        Self { invoker, timeout }
    }

    pub fn target(&self) -> String {
        self.invoker.target()
    }

    /// Forward one call, attaching and then retaining the session id
    pub async fn call(
        &self,
        call: &ToolCall,
        session: &mut SessionContext,
    ) -> Result<Value, CallError> {
        let envelope = ToolEnvelope::new(call);
        debug!(id = %envelope.id, tool = %envelope.tool, session = ?session.id(), "Bridging tool call");

        let payload = serde_json::to_vec(&envelope)?;
        let invocation = self
            .invoker
            .invoke(payload, session.id().map(str::to_string));
        let reply = match tokio::time::timeout(self.timeout, invocation).await {
            Ok(reply) => reply?,
            Err(_) => {
                warn!(id = %envelope.id, "Runtime did not answer within {:?}", self.timeout);
                return Err(CallError::Timeout(self.timeout));
            }
        };
        session.adopt(reply.session_id);

        unwrap_reply(&reply.body)
    }
}

/// Extract the tool payload from a runtime reply body
pub fn unwrap_reply(body: &str) -> Result<Value, CallError> {
    let value = parse_body(body)?;
    let Value::Object(fields) = value else {
        return Err(CallError::Malformed("reply is not a JSON object".to_string()));
    };

    for key in REPLY_FIELDS {
        let Some(found) = fields.get(key).filter(|v| !v.is_null()) else {
            continue;
        };
        if key == "error" {
            return Err(CallError::Remote(describe_error(found)));
        }
        return Ok(found.clone());
    }

    Err(CallError::Malformed(
        "reply has none of result, error, data, outputs".to_string(),
    ))
}

/// Plain JSON, or the last `data:` line of an event stream
fn parse_body(body: &str) -> Result<Value, CallError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(CallError::Malformed("empty reply".to_string()));
    }

    let json = if trimmed.starts_with("data:") || trimmed.starts_with("event:") {
        trimmed
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(str::trim)
            .filter(|data| !data.is_empty())
            .last()
            .ok_or_else(|| CallError::Malformed("event stream without data".to_string()))?
    } else {
        trimmed
    };

    serde_json::from_str(json).map_err(|e| CallError::Malformed(e.to_string()))
}

fn describe_error(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}
