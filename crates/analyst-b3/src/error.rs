//! Error types for company research operations

use thiserror::Error;

/// Company research specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Nothing matched the lookup
    #[error("Not found: {0}")]
    NotFound(String),

    /// The lookup matched a disambiguation page
    #[error("'{query}' is ambiguous ({} options)", .options.len())]
    Ambiguous {
        query: String,
        options: Vec<String>,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// RSS/XML parsing error
    #[error("Feed error: {0}")]
    FeedError(String),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Lookup did not finish within the configured timeout
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid user input
    #[error("{0}")]
    InvalidInput(String),

    /// Prompt template failed to render
    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    /// Model's structured answer did not match the report shape
    #[error("Invalid structured output: {0}")]
    StructuredOutput(String),

    /// Agent runtime or provider failure
    #[error(transparent)]
    Agent(#[from] analyst_core::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Convert ResearchError to analyst_core::Error
impl From<ResearchError> for analyst_core::Error {
    fn from(err: ResearchError) -> Self {
        match err {
            ResearchError::Agent(inner) => inner,
            other => analyst_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}
