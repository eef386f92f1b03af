//! Tool management and execution framework for analista
//!
//! This crate provides a framework for defining and executing tools (functions)
//! that agents can use to look things up.

pub mod args;
pub mod registry;
pub mod tool;

pub use args::text_argument;
pub use registry::ToolRegistry;
pub use tool::Tool;
