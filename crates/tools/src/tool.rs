//! Tool catalogue
//!
//! The set of tools is closed: every name that crosses a process boundary is
//! parsed into [`Tool`] first and unknown names are rejected there.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::store::{ToolStore, DEFAULT_TOP_K};
use crate::{Result, ToolError};

/// Known tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    OrderLookup,
    KbSearch,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::OrderLookup, Tool::KbSearch];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::OrderLookup => "order_lookup",
            Tool::KbSearch => "kb_search",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::OrderLookup => "Look up an order by order_id.",
            Tool::KbSearch => "Search a tiny FAQ store.",
        }
    }

    /// JSON schema of the tool's arguments
    pub fn parameters(&self) -> Value {
        match self {
            Tool::OrderLookup => json!({
                "type": "object",
                "properties": {
                    "order_id": { "type": "string", "description": "Order identifier" }
                },
                "required": ["order_id"]
            }),
            Tool::KbSearch => json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Text to look for" },
                    "top_k": { "type": "integer", "minimum": 0, "default": DEFAULT_TOP_K }
                },
                "required": ["query"]
            }),
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.parameters(),
        }
    }
}

impl FromStr for Tool {
    type Err = ToolError;

    fn from_str(name: &str) -> Result<Self> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry of a `tools/list` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// A tool together with its decoded arguments
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    OrderLookup { order_id: String },
    KbSearch { query: String, top_k: usize },
}

#[derive(Deserialize)]
struct OrderLookupArgs {
    order_id: String,
}

#[derive(Deserialize)]
struct KbSearchArgs {
    query: String,
    #[serde(default = "default_top_k")]
    top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl ToolCall {
    pub fn order_lookup(order_id: impl Into<String>) -> Self {
        ToolCall::OrderLookup {
            order_id: order_id.into(),
        }
    }

    pub fn kb_search(query: impl Into<String>, top_k: usize) -> Self {
        ToolCall::KbSearch {
            query: query.into(),
            top_k,
        }
    }

    /// Decode arguments for `tool`. A missing or null argument object is
    /// treated as empty.
    pub fn from_arguments(tool: Tool, arguments: Value) -> Result<Self> {
        let arguments = if arguments.is_null() {
            json!({})
        } else {
            arguments
        };
        let invalid = |source| ToolError::InvalidArguments {
            tool: tool.name(),
            source,
        };

        match tool {
            Tool::OrderLookup => {
                let args: OrderLookupArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(ToolCall::order_lookup(args.order_id))
            }
            Tool::KbSearch => {
                let args: KbSearchArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(ToolCall::kb_search(args.query, args.top_k))
            }
        }
    }

    pub fn tool(&self) -> Tool {
        match self {
            ToolCall::OrderLookup { .. } => Tool::OrderLookup,
            ToolCall::KbSearch { .. } => Tool::KbSearch,
        }
    }

    /// Arguments as they travel on the wire
    pub fn arguments(&self) -> Value {
        match self {
            ToolCall::OrderLookup { order_id } => json!({ "order_id": order_id }),
            ToolCall::KbSearch { query, top_k } => json!({ "query": query, "top_k": top_k }),
        }
    }

    /// Run the call against the store
    pub fn execute(&self, store: &ToolStore) -> Value {
        match self {
            ToolCall::OrderLookup { order_id } => json!(store.order_lookup(order_id)),
            ToolCall::KbSearch { query, top_k } => json!(store.kb_search(query, *top_k)),
        }
    }
}
