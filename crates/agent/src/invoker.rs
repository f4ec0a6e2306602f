//! Remote runtime invocation
//!
//! A [`RuntimeInvoker`] delivers one opaque JSON payload to a hosted runtime
//! and returns the raw body together with the session id the runtime
//! associated with the call.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, trace};

use agentcore_tools::SESSION_HEADER;

use crate::CallError;

/// Raw reply of one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeReply {
    pub session_id: Option<String>,
    pub body: String,
}

/// Delivers payloads to a runtime
#[async_trait]
pub trait RuntimeInvoker: Send + Sync {
    async fn invoke(
        &self,
        payload: Vec<u8>,
        session_id: Option<String>,
    ) -> Result<RuntimeReply, CallError>;

    /// Human-readable target, used in logs and status output
    fn target(&self) -> String;
}

/// Invoker that POSTs the payload to a URL, carrying the session in a header
pub struct HttpInvoker {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpInvoker {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CallError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    fn classify(&self, error: reqwest::Error) -> CallError {
        if error.is_timeout() {
            CallError::Timeout(self.timeout)
        } else {
            CallError::Request(error)
        }
    }
}

#[async_trait]
impl RuntimeInvoker for HttpInvoker {
    async fn invoke(
        &self,
        payload: Vec<u8>,
        session_id: Option<String>,
    ) -> Result<RuntimeReply, CallError> {
        trace!("POST {} ({} bytes)", self.url, payload.len());

        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(payload);
        if let Some(id) = &session_id {
            request = request.header(SESSION_HEADER, id);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CallError::Status(status.as_u16()));
        }

        let returned = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or(session_id);
        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!(session = ?returned, "Runtime replied with {} bytes", body.len());

        Ok(RuntimeReply {
            session_id: returned,
            body,
        })
    }

    fn target(&self) -> String {
        self.url.clone()
    }
}

#[cfg(feature = "agentcore")]
pub use agentcore::AgentCoreInvoker;

#[cfg(feature = "agentcore")]
mod agentcore {
    use async_trait::async_trait;
    use aws_config::timeout::TimeoutConfig;
    use aws_config::{BehaviorVersion, Region};
    use std::time::Duration;
    use aws_sdk_bedrockagentcore::error::DisplayErrorContext;
    use aws_sdk_bedrockagentcore::primitives::Blob;
    use aws_sdk_bedrockagentcore::Client;
    use tracing::{debug, trace};

    use super::{RuntimeInvoker, RuntimeReply};
    use crate::CallError;

    /// Invoker backed by Bedrock AgentCore `InvokeAgentRuntime`
    pub struct AgentCoreInvoker {
        client: Client,
        runtime_arn: String,
    }

    impl AgentCoreInvoker {
        /// Build a client for `region` using the default credential chain.
        /// `timeout` bounds each whole operation, retries included.
        pub async fn from_region(
            region: impl Into<String>,
            runtime_arn: impl Into<String>,
            timeout: Duration,
        ) -> Self {
            let timeouts = TimeoutConfig::builder().operation_timeout(timeout).build();
            let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.into()))
                .timeout_config(timeouts)
                .load()
                .await;
            Self {
                client: Client::new(&sdk_config),
                runtime_arn: runtime_arn.into(),
            }
        }
    }

    #[async_trait]
    impl RuntimeInvoker for AgentCoreInvoker {
        async fn invoke(
            &self,
            payload: Vec<u8>,
            session_id: Option<String>,
        ) -> Result<RuntimeReply, CallError> {
            trace!("InvokeAgentRuntime {}", self.runtime_arn);

            let output = self
                .client
                .invoke_agent_runtime()
                .agent_runtime_arn(&self.runtime_arn)
                .content_type("application/json")
                .accept("application/json")
                .set_runtime_session_id(session_id)
                .payload(Blob::new(payload))
                .send()
                .await
                .map_err(|e| CallError::Invoke(DisplayErrorContext(&e).to_string()))?;

            let returned = output.runtime_session_id().map(str::to_string);
            let bytes = output
                .response
                .collect()
                .await
                .map_err(|e| CallError::Invoke(e.to_string()))?
                .into_bytes();
            let body = String::from_utf8_lossy(&bytes).into_owned();
            debug!(session = ?returned, "AgentCore replied with {} bytes", body.len());

            Ok(RuntimeReply {
                session_id: returned,
                body,
            })
        }

        fn target(&self) -> String {
            self.runtime_arn.clone()
        }
    }
}
