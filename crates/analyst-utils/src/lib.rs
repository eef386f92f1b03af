//! Shared utilities for analista
//!
//! This crate provides common functionality used across the analista
//! workspace, currently the tracing setup shared by binaries and tests.

pub mod logging;

pub use logging::{LogFormat, init_tracing, init_tracing_with};
