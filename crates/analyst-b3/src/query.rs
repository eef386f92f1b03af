//! Company name entered by the user

use crate::error::{ResearchError, Result};
use std::fmt;

/// Trimmed, non-empty company name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyQuery(String);

impl CompanyQuery {
    /// Trim `input` and reject it when nothing is left
    pub fn parse(input: &str) -> Result<Self> {
        let name = input.trim();
        if name.is_empty() {
            return Err(ResearchError::InvalidInput(
                "Digite um nome valido para empresa".to_string(),
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompanyQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
