//! Prompt router
//!
//! Two fixed patterns decide which tool, if any, a prompt is for. The order
//! pattern is always tried first, so a prompt mentioning both an order and a
//! search resolves to the order lookup.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use agentcore_tools::{ToolCall, DEFAULT_TOP_K};

use crate::client::ERROR_FIELD;

fn order_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)order[:\s]+([0-9]{3,})").expect("order pattern"))
}

fn search_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)(?:kb\s+)?search\s+(.+)").expect("search pattern"))
}

/// Pick the tool call a prompt asks for
pub fn route(prompt: &str) -> Option<ToolCall> {
    let prompt = prompt.trim();

    if let Some(caps) = order_pattern().captures(prompt) {
        return Some(ToolCall::order_lookup(&caps[1]));
    }

    if let Some(caps) = search_pattern().captures(prompt) {
        let query = caps[1].trim();
        if !query.is_empty() {
            return Some(ToolCall::kb_search(query, DEFAULT_TOP_K));
        }
    }

    None
}

/// Outcome of routing one prompt: the call that was made and what it returned
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    pub call: Option<ToolCall>,
    pub result: Option<Value>,
}

impl RoutingDecision {
    pub fn unrouted() -> Self {
        Self {
            call: None,
            result: None,
        }
    }

    pub fn routed(call: ToolCall, result: Value) -> Self {
        Self {
            call: Some(call),
            result: Some(result),
        }
    }

    /// Transport-level failure message, if the call failed
    pub fn error(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|r| r.get(ERROR_FIELD))
            .map(|e| e.as_str().unwrap_or("unknown error"))
    }

    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }
}
