//! Front-end request handling

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::client::ToolClient;
use crate::reply::{self, GREETING};
use crate::router::{self, RoutingDecision};
use crate::session::SessionContext;

/// Body fields that may carry the prompt, in lookup order
const PROMPT_FIELDS: [&str; 4] = ["prompt", "input", "message", "inputText"];

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Tool call report attached to a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallReport {
    pub tool: String,
    pub args: Value,
    pub result: Value,
}

/// Body of an `/invocations` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCallReport>,
    pub status: String,
}

impl InvocationResponse {
    fn greeting() -> Self {
        Self {
            response: GREETING.to_string(),
            tool_call: None,
            status: STATUS_SUCCESS.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == STATUS_ERROR
    }
}

/// First usable value among the accepted prompt fields. Numbers and `true`
/// count as prompts and are rendered as text; empty strings, zero, `false`,
/// null, arrays and objects are skipped.
pub fn extract_prompt(body: &Value) -> Option<String> {
    PROMPT_FIELDS
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(prompt_text)
}

fn prompt_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Routes prompts to tools and renders replies
pub struct Agent {
    client: ToolClient,
}

impl Agent {
    pub fn new(client: ToolClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ToolClient {
        &self.client
    }

    /// Handle a raw request body
    pub async fn handle(&self, body: &Value, session: &mut SessionContext) -> InvocationResponse {
        match extract_prompt(body) {
            Some(prompt) => self.respond(&prompt, session).await,
            None => {
                debug!("Request carried no prompt");
                InvocationResponse::greeting()
            }
        }
    }

    /// Route one prompt, call at most one tool, and format the reply
    pub async fn respond(&self, prompt: &str, session: &mut SessionContext) -> InvocationResponse {
        let prompt = prompt.trim();
        let decision = match router::route(prompt) {
            Some(call) => {
                info!(tool = %call.tool(), "Routing prompt to tool");
                let result = self.client.call(&call, session).await;
                RoutingDecision::routed(call, result)
            }
            None => RoutingDecision::unrouted(),
        };

        let response = reply::render(prompt, &decision);
        let status = if decision.is_error() {
            STATUS_ERROR
        } else {
            STATUS_SUCCESS
        };
        let tool_call = match (&decision.call, decision.result) {
            (Some(call), Some(result)) => Some(ToolCallReport {
                tool: call.tool().name().to_string(),
                args: call.arguments(),
                result,
            }),
            _ => None,
        };

        InvocationResponse {
            response,
            tool_call,
            status: status.to_string(),
        }
    }
}
