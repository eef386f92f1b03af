//! Agent runtime for analista
//!
//! This crate provides the [`AgentExecutor`], the tool-calling loop that
//! drives an LLM provider against a tool registry, plus the execution event
//! hooks used for logging and tool-call traces.

pub mod events;
pub mod executor;

// Re-export key types
pub use events::{ExecutorEventHandler, ToolCallRecord, ToolTrace};
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig};
