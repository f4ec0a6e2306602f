//! Session context for remote tool calls

use chrono::{DateTime, Local};

/// Correlates a sequence of remote calls to one backing tool-process session.
///
/// The context is owned by whoever issues the calls and passed in by
/// reference; nothing here is process-global.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: Option<String>,
    tool_calls: u64,
    started_at: DateTime<Local>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session_id: None,
            tool_calls: 0,
            started_at: Local::now(),
        }
    }

    /// Start from a known session id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            session_id: Some(id.into()),
            ..Self::new()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn tool_calls(&self) -> u64 {
        self.tool_calls
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn record_call(&mut self) {
        self.tool_calls += 1;
    }

    /// Keep the id returned by a remote call. Only the first id is retained.
    pub fn adopt(&mut self, returned: Option<String>) {
        if self.session_id.is_none() {
            self.session_id = returned.filter(|id| !id.is_empty());
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
