//! Front-end HTTP surface: `GET /ping` and `POST /invocations`

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::agent::{Agent, InvocationResponse};
use crate::session::SessionContext;
use crate::AgentError;

/// Shared by all requests. The session context is locked for the duration of
/// a request, so bridge calls from concurrent requests are serialised.
/// `/ping` reads `snapshot`, which is refreshed after each request and never
/// held across a tool call.
pub struct AppState {
    agent: Agent,
    session: Mutex<SessionContext>,
    snapshot: RwLock<SessionContext>,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        let session = SessionContext::new();
        Self {
            agent,
            snapshot: RwLock::new(session.clone()),
            session: Mutex::new(session),
        }
    }

    fn snapshot(&self) -> SessionContext {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, session: &SessionContext) {
        match self.snapshot.write() {
            Ok(mut guard) => *guard = session.clone(),
            Err(poisoned) => *poisoned.into_inner() = session.clone(),
        }
    }
}

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/invocations", post(invocations))
        .with_state(state)
}

/// Bind `addr` and serve until the process stops
pub async fn serve(state: SharedState, addr: SocketAddr) -> Result<(), AgentError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AgentError::Bind { addr, source })?;
    info!(%addr, transport = %state.agent.client().mode(), "Front-end ready");

    axum::serve(listener, router(state))
        .await
        .map_err(AgentError::Serve)
}

async fn ping(State(state): State<SharedState>) -> Json<Value> {
    let session = state.snapshot();
    Json(json!({
        "status": "healthy",
        "transport": state.agent.client().mode().as_str(),
        "session_id": session.id(),
        "session_started": session.started_at().to_rfc3339(),
        "tool_calls": session.tool_calls(),
    }))
}

async fn invocations(State(state): State<SharedState>, body: Bytes) -> Json<InvocationResponse> {
    // Bodies that are not JSON are treated like bodies without a prompt
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let mut session = state.session.lock().await;
    let response = state.agent.handle(&body, &mut session).await;
    state.publish(&session);
    debug!(status = %response.status, calls = session.tool_calls(), "Handled /invocations");

    Json(response)
}
