//! Reply formatter

use serde_json::Value;

use agentcore_tools::ToolCall;

use crate::router::RoutingDecision;

/// Reply used when a request carries no prompt at all
pub const GREETING: &str = "Hello from AgentCore POC!";

/// Render a routing decision as natural language
pub fn render(prompt: &str, decision: &RoutingDecision) -> String {
    let Some(call) = &decision.call else {
        return format!("You said: {}", prompt);
    };
    if let Some(cause) = decision.error() {
        return format!("Tool error: {}", cause);
    }

    let result = decision.result.as_ref().unwrap_or(&Value::Null);
    match call {
        ToolCall::OrderLookup { order_id } => render_order(order_id, result),
        ToolCall::KbSearch { query, .. } => render_search(query, result),
    }
}

fn render_order(order_id: &str, result: &Value) -> String {
    if result.get("error").is_some() {
        return format!("Order {} not found.", order_id);
    }
    format!(
        "Order {}: status {}, ETA {}, items {}, total {}",
        order_id,
        field(result, "status"),
        field(result, "eta"),
        field(result, "items"),
        field(result, "total"),
    )
}

fn render_search(query: &str, result: &Value) -> String {
    let hits = result.as_array().map(Vec::as_slice).unwrap_or_default();
    if hits.is_empty() {
        return format!("No FAQ hits for '{}'.", query);
    }

    let mut lines = vec!["Top FAQ results:".to_string()];
    for hit in hits {
        lines.push(format!("- {}: {}", field(hit, "title"), field(hit, "snippet")));
    }
    lines.join("\n")
}

/// Strings without quotes, everything else as JSON
fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "?".to_string(),
        Some(other) => other.to_string(),
    }
}
