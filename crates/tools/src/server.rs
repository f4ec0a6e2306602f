//! Tool server HTTP surface

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::envelope::{EnvelopeReply, ToolEnvelope, SESSION_HEADER};
use crate::rpc::{handle_rpc, RpcRequest, RpcResponse};
use crate::store::{ToolStore, DEFAULT_TOP_K};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

type SharedStore = Arc<ToolStore>;

/// Build the tool server routes
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/mcp", post(mcp))
        .route("/debug/order_lookup", get(debug_order_lookup))
        .route("/debug/kb_search", get(debug_kb_search))
        .with_state(store)
}

/// Bind `addr` and serve until the process stops
pub async fn serve(store: SharedStore, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "Tool server ready");

    axum::serve(listener, router(store))
        .await
        .map_err(ServerError::Serve)
}

async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "mcp-server" }))
}

async fn mcp(State(store): State<SharedStore>, headers: HeaderMap, body: Bytes) -> Response {
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let reply = match serde_json::from_slice::<Value>(&body) {
        Ok(value) if ToolEnvelope::is_tool_call(&value) => {
            match serde_json::from_value::<ToolEnvelope>(value) {
                Ok(envelope) => json!(EnvelopeReply::answer(&store, envelope)),
                Err(e) => json!(RpcResponse::invalid_request(None, e.to_string())),
            }
        }
        Ok(value) => match serde_json::from_value::<RpcRequest>(value) {
            Ok(request) => json!(handle_rpc(&store, request)),
            Err(e) => json!(RpcResponse::invalid_request(None, e.to_string())),
        },
        Err(e) => json!(RpcResponse::parse_error(e.to_string())),
    };
    debug!(session = %session_id, "Handled /mcp request");

    let mut response = Json(reply).into_response();
    if let Ok(value) = HeaderValue::from_str(&session_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(SESSION_HEADER), value);
    }
    response
}

#[derive(Deserialize)]
struct OrderQuery {
    order_id: String,
}

async fn debug_order_lookup(
    State(store): State<SharedStore>,
    Query(query): Query<OrderQuery>,
) -> Json<Value> {
    debug!(order_id = %query.order_id, "Debug order lookup");
    Json(json!(store.order_lookup(&query.order_id)))
}

#[derive(Deserialize)]
struct SearchQuery {
    query: String,
    #[serde(default = "default_top_k")]
    top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

async fn debug_kb_search(
    State(store): State<SharedStore>,
    Query(query): Query<SearchQuery>,
) -> Json<Value> {
    debug!(query = %query.query, top_k = query.top_k, "Debug FAQ search");
    Json(json!(store.kb_search(&query.query, query.top_k)))
}
