//! AgentCore POC command implementations

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use agentcore_agent::{Agent, AppState, HttpInvoker, RuntimeInvoker, SessionContext, ToolClient};
use agentcore_config::{self, Config};
use agentcore_tools::{RpcRequest, ToolStore};

/// Prompts sent by `invoke` when none are given
const DEFAULT_PROMPTS: [&str; 2] = ["order 12345", "search refund"];

/// Timeout for calls to an agent runtime, which may itself wait on a tool
const INVOKE_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve a `host:port` listen address, host names included
async fn resolve_addr(addr: &str) -> Result<SocketAddr> {
    tokio::net::lookup_host(addr)
        .await
        .with_context(|| format!("Invalid listen address: {}", addr))?
        .next()
        .with_context(|| format!("No address found for {}", addr))
}

/// Run the tool server
pub async fn tools_command() -> Result<()> {
    let config = Config::load().await?;
    let addr = resolve_addr(&config.tools_addr()).await?;
    let store = ToolStore::seeded();

    println!("◆ Starting tool server on {}", addr);
    info!(
        "Tools: order_lookup ({} orders), kb_search ({} FAQ entries)",
        store.order_count(),
        store.faq_count()
    );

    agentcore_tools::serve(Arc::new(store), addr).await?;
    Ok(())
}

/// Run the agent front-end
pub async fn agent_command() -> Result<()> {
    let config = Config::load().await?;
    let addr = resolve_addr(&config.frontend_addr()).await?;

    let client = ToolClient::from_config(&config)
        .await
        .context("Could not set up the tool transport")?;
    println!(
        "◆ Starting front-end on {} (transport: {}, target: {})",
        addr,
        client.mode(),
        client.target()
    );

    let state = Arc::new(AppState::new(Agent::new(client)));
    agentcore_agent::serve(state, addr).await?;
    Ok(())
}

/// Invoker for the agent runtime: AgentCore when an agent ARN is configured,
/// the local front-end otherwise
async fn agent_invoker(config: &Config) -> Result<Box<dyn RuntimeInvoker>> {
    if let Some(arn) = &config.remote.agent_runtime_arn {
        return agentcore_invoker(&config.remote.region, arn, INVOKE_TIMEOUT, "AGENT_RUNTIME_ARN")
            .await;
    }

    let host = match config.frontend.host.as_str() {
        "0.0.0.0" | "::" => "127.0.0.1",
        other => other,
    };
    let url = format!("http://{}:{}/invocations", host, config.frontend.port);
    Ok(Box::new(HttpInvoker::new(url, INVOKE_TIMEOUT)?))
}

/// Invoker for the tool runtime: AgentCore when a tool ARN is configured,
/// the tool server's `/mcp` endpoint otherwise
async fn mcp_invoker(config: &Config) -> Result<Box<dyn RuntimeInvoker>> {
    if let Some(arn) = &config.remote.runtime_arn {
        return agentcore_invoker(
            &config.remote.region,
            arn,
            config.tool_timeout(),
            "MCP_RUNTIME_ARN",
        )
        .await;
    }

    let url = format!("{}/mcp", config.tools.base_url);
    Ok(Box::new(HttpInvoker::new(url, config.tool_timeout())?))
}

#[cfg(feature = "agentcore")]
async fn agentcore_invoker(
    region: &str,
    arn: &str,
    timeout: Duration,
    _source: &str,
) -> Result<Box<dyn RuntimeInvoker>> {
    let invoker = agentcore_agent::AgentCoreInvoker::from_region(region, arn, timeout).await;
    Ok(Box::new(invoker))
}

#[cfg(not(feature = "agentcore"))]
async fn agentcore_invoker(
    _region: &str,
    _arn: &str,
    _timeout: Duration,
    source: &str,
) -> Result<Box<dyn RuntimeInvoker>> {
    anyhow::bail!("{} is set but this build lacks the `agentcore` feature", source)
}

/// Pretty JSON when the body parses, the raw text otherwise
fn render_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}

/// Send prompts to an agent runtime, reusing its session between turns
pub async fn invoke_command(prompts: Vec<String>) -> Result<()> {
    let config = Config::load().await?;
    let prompts = if prompts.is_empty() {
        DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect()
    } else {
        prompts
    };

    let invoker = agent_invoker(&config).await?;
    println!("◆ Invoking {}", invoker.target());

    let mut session = SessionContext::new();
    for (turn, prompt) in prompts.iter().enumerate() {
        let payload = serde_json::to_vec(&json!({ "prompt": prompt }))?;
        let reply = invoker
            .invoke(payload, session.id().map(str::to_string))
            .await
            .with_context(|| format!("Turn {} failed", turn + 1))?;
        session.adopt(reply.session_id);
        session.record_call();

        println!("--- Turn {} ---", turn + 1);
        println!("Session: {}", session.id().unwrap_or("[none]"));
        println!("Prompt:  {}", prompt);
        println!("Reply:   {}", render_body(&reply.body));
    }

    debug!("Sent {} prompts", session.tool_calls());
    Ok(())
}

/// The fixed JSON-RPC conversation used by `mcp`
fn mcp_requests() -> Vec<RpcRequest> {
    vec![
        RpcRequest::new(1, "initialize", json!({})),
        RpcRequest::new(2, "tools/list", json!({})),
        RpcRequest::new(
            3,
            "tools/call",
            json!({"name": "order_lookup", "arguments": {"order_id": "12345"}}),
        ),
        RpcRequest::new(
            4,
            "tools/call",
            json!({"name": "kb_search", "arguments": {"query": "refund", "top_k": 3}}),
        ),
    ]
}

/// Drive the tool runtime's JSON-RPC surface
pub async fn mcp_command() -> Result<()> {
    let config = Config::load().await?;
    let invoker = mcp_invoker(&config).await?;
    println!("◆ MCP session with {}", invoker.target());

    let mut session = SessionContext::new();
    for request in mcp_requests() {
        let method = request.method.clone();
        let payload = serde_json::to_vec(&request)?;
        let reply = invoker
            .invoke(payload, session.id().map(str::to_string))
            .await
            .with_context(|| format!("{} failed", method))?;
        session.adopt(reply.session_id);

        println!("--- {} ---", method);
        println!("Session: {}", session.id().unwrap_or("[none]"));
        println!("{}", render_body(&reply.body));
    }

    Ok(())
}

fn or_unset(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("[Not set]")
}

/// Show resolved configuration
pub async fn status_command() -> Result<()> {
    let config_path = agentcore_config::config_path();
    let config = Config::load().await?;

    println!("◆ AgentCore POC Status");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config:      {} {}",
        config_path.display(),
        if config_path.exists() {
            "[OK]"
        } else {
            "[Defaults]"
        }
    );
    println!("Transport:   {}", config.transport_mode());
    println!("Front-end:   {}", config.frontend_addr());
    println!("Tool server: {}", config.tools_addr());
    println!("Tool URL:    {}", config.tools.base_url);
    println!("Timeout:     {}s", config.tools.timeout_secs);
    println!("MCP ARN:     {}", or_unset(&config.remote.runtime_arn));
    println!("Agent ARN:   {}", or_unset(&config.remote.agent_runtime_arn));
    println!("Region:      {}", config.remote.region);
    println!(
        "AgentCore:   {}",
        if cfg!(feature = "agentcore") {
            "[Built in]"
        } else {
            "[Not built]"
        }
    );

    Ok(())
}
