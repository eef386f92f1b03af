//! Core abstractions for analista
//!
//! This crate defines the fundamental trait and error type shared by the
//! LLM, tool, runtime and domain crates of the workspace.

pub mod agent;
pub mod error;

pub use agent::Agent;
pub use error::{Error, Result};
