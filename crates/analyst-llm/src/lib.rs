//! LLM provider abstraction layer for analista
//!
//! This crate provides provider-agnostic abstractions for interacting with
//! hosted Large Language Models. It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types, including schema-constrained output
//! - Tool definitions for function calling
//! - Provider trait for LLM implementations
//! - The Gemini provider (behind the default `gemini` feature)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, StopReason, TokenUsage,
};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
