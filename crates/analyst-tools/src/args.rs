//! Argument extraction helpers for tool implementations

use analyst_core::{Error, Result};
use serde_json::Value;

/// Read a string argument and trim it
///
/// A missing key or a non-string value is an [`Error::InvalidArguments`];
/// a present but blank string comes back empty so the tool can answer it.
pub fn text_argument(params: &Value, key: &str) -> Result<String> {
    match params.get(key) {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(Error::InvalidArguments(format!(
            "'{key}' must be a string, got {other}"
        ))),
        None => Err(Error::InvalidArguments(format!("missing '{key}'"))),
    }
}
