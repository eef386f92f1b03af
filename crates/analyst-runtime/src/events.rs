//! Execution event hooks

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};

/// Event handler for agent execution events
///
/// Implement this trait to receive callbacks during agent execution.
#[async_trait]
pub trait ExecutorEventHandler: Send + Sync {
    /// Called when a tool execution starts
    async fn on_tool_start(&self, _id: &str, _name: &str, _input: &Value) {}

    /// Called when a tool execution completes
    async fn on_tool_done(
        &self,
        _id: &str,
        _name: &str,
        _input: &Value,
        _result: std::result::Result<&str, &str>,
        _duration_ms: u64,
    ) {
    }

    /// Called when the agent completes
    async fn on_complete(&self, _result: &str) {}

    /// Called when an error occurs
    async fn on_error(&self, _error: &str) {}
}

/// One executed tool call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCallRecord {
    /// Tool name
    pub name: String,
    /// Arguments the model sent
    pub input: Value,
    /// Text handed back to the model
    pub output: String,
    /// Whether the call failed at the framework level
    pub is_error: bool,
}

/// Event handler that records every tool call in execution order
#[derive(Debug, Default)]
pub struct ToolTrace {
    calls: Mutex<Vec<ToolCallRecord>>,
}

impl ToolTrace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded calls
    pub fn calls(&self) -> Vec<ToolCallRecord> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the called tools, in call order
    pub fn tool_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.name).collect()
    }

    /// Whether any tool output contains `needle`
    pub fn output_contains(&self, needle: &str) -> bool {
        self.calls().iter().any(|c| c.output.contains(needle))
    }
}

#[async_trait]
impl ExecutorEventHandler for ToolTrace {
    async fn on_tool_done(
        &self,
        _id: &str,
        name: &str,
        input: &Value,
        result: std::result::Result<&str, &str>,
        _duration_ms: u64,
    ) {
        let (output, is_error) = match result {
            Ok(out) => (out.to_string(), false),
            Err(err) => (err.to_string(), true),
        };
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ToolCallRecord {
                name: name.to_string(),
                input: input.clone(),
                output,
                is_error,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn trace_records_in_order() {
        let trace = ToolTrace::new();
        trace
            .on_tool_done(
                "1",
                "buscar_ticker_empresa",
                &json!({"empresa": "magalu"}),
                Ok("MGLU3.SA"),
                3,
            )
            .await;
        trace
            .on_tool_done("2", "inexistente", &json!({}), Err("Tool not found"), 0)
            .await;

        let calls = trace.calls();
        assert_eq!(trace.tool_names(), vec!["buscar_ticker_empresa", "inexistente"]);
        assert_eq!(calls[0].input["empresa"], "magalu");
        assert!(!calls[0].is_error);
        assert!(calls[1].is_error);
        assert!(trace.output_contains("MGLU3"));
    }
}
