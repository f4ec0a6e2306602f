//! Tool invocation adapter
//!
//! [`ToolClient`] hides which transport reaches the tool server. Calls never
//! fail outright: any transport problem comes back as a JSON object carrying
//! an `_error` field, which callers must check before using the result.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use agentcore_config::{Config, TransportMode};
use agentcore_tools::ToolCall;

use crate::bridge::BridgeClient;
use crate::invoker::RuntimeInvoker;
use crate::session::SessionContext;
use crate::{AgentError, CallError};

/// Field marking a failed tool call
pub const ERROR_FIELD: &str = "_error";

/// Structured error value for a failed call
pub fn error_payload(error: &CallError) -> Value {
    json!({ ERROR_FIELD: error.to_string() })
}

/// Direct HTTP access to the tool server's debug endpoints
pub struct HttpToolClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpToolClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CallError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn call(&self, call: &ToolCall) -> Result<Value, CallError> {
        let request = match call {
            ToolCall::OrderLookup { order_id } => self
                .client
                .get(format!("{}/debug/order_lookup", self.base_url))
                .query(&[("order_id", order_id.as_str())]),
            ToolCall::KbSearch { query, top_k } => self
                .client
                .get(format!("{}/debug/kb_search", self.base_url))
                .query(&[("query", query.clone()), ("top_k", top_k.to_string())]),
        };
        debug!(tool = %call.tool(), base = %self.base_url, "Calling tool over HTTP");

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CallError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        serde_json::from_str(&body).map_err(|e| CallError::Malformed(e.to_string()))
    }

    fn classify(&self, error: reqwest::Error) -> CallError {
        if error.is_timeout() {
            CallError::Timeout(self.timeout)
        } else {
            CallError::Request(error)
        }
    }
}

/// The transport chosen for this process
pub enum ToolClient {
    Http(HttpToolClient),
    Bridge(BridgeClient),
}

impl ToolClient {
    pub fn http(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CallError> {
        Ok(ToolClient::Http(HttpToolClient::new(base_url, timeout)?))
    }

    pub fn bridge(invoker: Box<dyn RuntimeInvoker>, timeout: Duration) -> Self {
        ToolClient::Bridge(BridgeClient::new(invoker, timeout))
    }

    /// Build the transport selected by `config`
    pub async fn from_config(config: &Config) -> Result<Self, AgentError> {
        match (config.transport_mode(), &config.remote.runtime_arn) {
            (TransportMode::AgentCore, Some(arn)) => {
                info!(runtime = %arn, region = %config.remote.region, "Using AgentCore transport");
                Self::agentcore(&config.remote.region, arn, config.tool_timeout()).await
            }
            _ => {
                info!(base = %config.tools.base_url, "Using HTTP transport");
                Ok(Self::http(&config.tools.base_url, config.tool_timeout())?)
            }
        }
    }

    #[cfg(feature = "agentcore")]
    async fn agentcore(region: &str, arn: &str, timeout: Duration) -> Result<Self, AgentError> {
        let invoker = crate::invoker::AgentCoreInvoker::from_region(region, arn, timeout).await;
        Ok(Self::bridge(Box::new(invoker), timeout))
    }

    #[cfg(not(feature = "agentcore"))]
    async fn agentcore(_region: &str, _arn: &str, _timeout: Duration) -> Result<Self, AgentError> {
        Err(AgentError::AgentCoreUnavailable)
    }

    pub fn mode(&self) -> TransportMode {
        match self {
            ToolClient::Http(_) => TransportMode::Http,
            ToolClient::Bridge(_) => TransportMode::AgentCore,
        }
    }

    pub fn target(&self) -> String {
        match self {
            ToolClient::Http(client) => client.base_url().to_string(),
            ToolClient::Bridge(bridge) => bridge.target(),
        }
    }

    /// Run a call, propagating transport errors
    pub async fn try_call(
        &self,
        call: &ToolCall,
        session: &mut SessionContext,
    ) -> Result<Value, CallError> {
        session.record_call();
        match self {
            ToolClient::Http(client) => client.call(call).await,
            ToolClient::Bridge(bridge) => bridge.call(call, session).await,
        }
    }

    /// Run a call, folding transport errors into an `_error` payload
    pub async fn call(&self, call: &ToolCall, session: &mut SessionContext) -> Value {
        match self.try_call(call, session).await {
            Ok(value) => value,
            Err(e) => {
                warn!(tool = %call.tool(), "Tool call failed: {}", e);
                error_payload(&e)
            }
        }
    }
}
