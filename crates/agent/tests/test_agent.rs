//! End-to-end prompt handling over the HTTP transport

mod common;

use agentcore_agent::{Agent, SessionContext, ToolClient};
use serde_json::json;
use std::time::Duration;

use common::{dead_base_url, http_agent, spawn_silent_server, spawn_tool_server};

#[tokio::test]
async fn test_order_found() {
    let base = spawn_tool_server().await;
    let agent = http_agent(&base);
    let mut session = SessionContext::new();

    let response = agent.respond("order 12345", &mut session).await;

    assert!(response
        .response
        .contains("Order 12345: status Shipped, ETA 2025-09-20, items 3, total 129.5"));
    assert_eq!(response.status, "success");
    let report = response.tool_call.expect("tool call report");
    assert_eq!(report.tool, "order_lookup");
    assert_eq!(report.args, json!({"order_id": "12345"}));
    assert_eq!(report.result["status"], "Shipped");
    assert_eq!(session.tool_calls(), 1);
}

#[tokio::test]
async fn test_order_not_found() {
    let base = spawn_tool_server().await;
    let agent = http_agent(&base);
    let mut session = SessionContext::new();

    let response = agent.respond("order 99999", &mut session).await;

    assert_eq!(response.response, "Order 99999 not found.");
    assert_eq!(response.status, "success");
}

#[tokio::test]
async fn test_search_refund() {
    let base = spawn_tool_server().await;
    let agent = http_agent(&base);
    let mut session = SessionContext::new();

    let response = agent.respond("search refund", &mut session).await;

    assert!(response.response.starts_with("Top FAQ results:"));
    assert!(response.response.contains("- Refund timeline: "));
    let report = response.tool_call.unwrap();
    assert_eq!(report.tool, "kb_search");
    assert_eq!(report.args, json!({"query": "refund", "top_k": 3}));
}

#[tokio::test]
async fn test_search_without_hits() {
    let base = spawn_tool_server().await;
    let agent = http_agent(&base);
    let mut session = SessionContext::new();

    let response = agent.respond("kb search warranty", &mut session).await;

    assert_eq!(response.response, "No FAQ hits for 'warranty'.");
}

#[tokio::test]
async fn test_unrouted_prompt_calls_nothing() {
    let agent = http_agent(&dead_base_url().await);
    let mut session = SessionContext::new();

    let response = agent.respond("hello there", &mut session).await;

    assert_eq!(response.response, "You said: hello there");
    assert_eq!(response.tool_call, None);
    assert_eq!(response.status, "success");
    assert_eq!(session.tool_calls(), 0);
}

#[tokio::test]
async fn test_unreachable_tool_server() {
    let agent = http_agent(&dead_base_url().await);
    let mut session = SessionContext::new();

    let response = agent.respond("order 12345", &mut session).await;

    assert!(response.response.starts_with("Tool error: "));
    assert!(response.is_error());
    let report = response.tool_call.unwrap();
    assert!(report.result["_error"].is_string());
}

#[tokio::test]
async fn test_slow_tool_server_times_out() {
    let base = spawn_silent_server().await;
    let agent = Agent::new(ToolClient::http(&base, Duration::from_millis(200)).unwrap());
    let mut session = SessionContext::new();

    let response = agent.respond("search refund", &mut session).await;

    assert!(response.response.starts_with("Tool error: "));
    assert!(response.response.contains("timed out"));
    assert_eq!(response.status, "error");
}

#[tokio::test]
async fn test_handle_reads_alternate_fields() {
    let base = spawn_tool_server().await;
    let agent = http_agent(&base);
    let mut session = SessionContext::new();

    for body in [
        json!({"prompt": "order 12345"}),
        json!({"input": "order 12345"}),
        json!({"message": "order 12345"}),
        json!({"inputText": "order 12345"}),
    ] {
        let response = agent.handle(&body, &mut session).await;
        assert!(response.response.starts_with("Order 12345:"), "body: {body}");
    }
}

#[tokio::test]
async fn test_handle_without_prompt_greets() {
    let agent = http_agent(&dead_base_url().await);
    let mut session = SessionContext::new();

    for body in [
        json!({}),
        json!({"prompt": ""}),
        json!({"prompt": 0}),
        json!({"prompt": false}),
        json!({"prompt": [1]}),
        json!(null),
    ] {
        let response = agent.handle(&body, &mut session).await;
        assert_eq!(response.response, "Hello from AgentCore POC!");
        assert_eq!(response.tool_call, None);
    }
}

#[tokio::test]
async fn test_handle_echoes_scalar_prompts() {
    let agent = http_agent(&dead_base_url().await);
    let mut session = SessionContext::new();

    let response = agent.handle(&json!({"prompt": 123}), &mut session).await;
    assert_eq!(response.response, "You said: 123");
    assert_eq!(response.tool_call, None);

    let response = agent.handle(&json!({"message": true}), &mut session).await;
    assert_eq!(response.response, "You said: true");

    let response = agent.handle(&json!({"prompt": 0, "input": 1.5}), &mut session).await;
    assert_eq!(response.response, "You said: 1.5");
}

#[test]
fn test_extract_prompt_order() {
    use agentcore_agent::extract_prompt;

    let body = json!({"message": "second", "prompt": "first"});
    assert_eq!(extract_prompt(&body).as_deref(), Some("first"));

    let body = json!({"prompt": "   ", "input": "fallback"});
    assert_eq!(extract_prompt(&body).as_deref(), Some("fallback"));
}
