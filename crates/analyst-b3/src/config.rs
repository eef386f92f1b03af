//! Configuration for company research runs

use crate::error::{ResearchError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default hosted model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Browser User-Agent sent to the lookup services
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Shape of the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Markdown report for the terminal
    #[default]
    Markdown,
    /// JSON report constrained by a response schema
    Structured,
}

/// Configuration for company research runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Hosted model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Max tokens per model turn
    pub max_tokens: usize,

    /// Max model turns per report
    pub max_iterations: usize,

    /// Report shape
    pub output_format: OutputFormat,

    /// HTTP timeout for each lookup tool call
    pub tool_timeout: Duration,

    /// HTTP timeout for each model call
    pub model_timeout: Duration,

    /// Max news entries returned by the news tool
    pub news_limit: usize,

    /// Sentences requested from the encyclopedia summary
    pub summary_sentences: usize,

    /// Quotes requested from the ticker autocomplete
    pub quotes_count: usize,

    /// Calendar days of daily history fetched for the price tool
    pub price_window_days: i64,

    /// User-Agent header for the lookup services
    pub user_agent: String,

    /// Ticker autocomplete base URL
    pub yahoo_search_base: String,

    /// MediaWiki action API endpoint
    pub wikipedia_api: String,

    /// Google News base URL
    pub google_news_base: String,

    /// DuckDuckGo lite base URL
    pub duckduckgo_base: String,

    /// Gemini API base URL
    pub gemini_api_base: String,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_tokens: 8192,
            max_iterations: 12,
            output_format: OutputFormat::Markdown,
            tool_timeout: Duration::from_secs(30),
            model_timeout: Duration::from_secs(120),
            news_limit: 20,
            summary_sentences: 6,
            quotes_count: 15,
            price_window_days: 7,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            yahoo_search_base: "https://query2.finance.yahoo.com".to_string(),
            wikipedia_api: "https://pt.wikipedia.org/w/api.php".to_string(),
            google_news_base: "https://news.google.com".to_string(),
            duckduckgo_base: "https://lite.duckduckgo.com".to_string(),
            gemini_api_base: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

impl ResearchConfig {
    /// Create a new configuration builder
    pub fn builder() -> ResearchConfigBuilder {
        ResearchConfigBuilder::default()
    }

    /// Defaults overridden by `GEMINI_MODEL` and `GEMINI_API_BASE`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(model) = non_empty_env("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base) = non_empty_env("GEMINI_API_BASE") {
            config.gemini_api_base = base;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ResearchError::ConfigError(
                "model must not be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ResearchError::ConfigError(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        for (name, value) in [
            ("max_tokens", self.max_tokens),
            ("max_iterations", self.max_iterations),
            ("news_limit", self.news_limit),
            ("summary_sentences", self.summary_sentences),
            ("quotes_count", self.quotes_count),
        ] {
            if value == 0 {
                return Err(ResearchError::ConfigError(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        if self.price_window_days <= 0 {
            return Err(ResearchError::ConfigError(
                "price_window_days must be greater than 0".to_string(),
            ));
        }

        if self.tool_timeout.is_zero() || self.model_timeout.is_zero() {
            return Err(ResearchError::ConfigError(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("yahoo_search_base", &self.yahoo_search_base),
            ("wikipedia_api", &self.wikipedia_api),
            ("google_news_base", &self.google_news_base),
            ("duckduckgo_base", &self.duckduckgo_base),
            ("gemini_api_base", &self.gemini_api_base),
        ] {
            url::Url::parse(value).map_err(|e| {
                ResearchError::ConfigError(format!("{name} is not a valid URL ({value}): {e}"))
            })?;
        }

        Ok(())
    }

    /// Point every lookup endpoint at one base URL (mock servers)
    ///
    /// Paths are kept: `{base}/w/api.php` for the encyclopedia and the bare
    /// base for the other services.
    pub fn with_mock_base(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.yahoo_search_base = base.to_string();
        self.wikipedia_api = format!("{base}/w/api.php");
        self.google_news_base = base.to_string();
        self.duckduckgo_base = base.to_string();
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for ResearchConfig
#[derive(Debug, Default)]
pub struct ResearchConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    max_iterations: Option<usize>,
    output_format: Option<OutputFormat>,
    tool_timeout: Option<Duration>,
    model_timeout: Option<Duration>,
    news_limit: Option<usize>,
    summary_sentences: Option<usize>,
    quotes_count: Option<usize>,
    price_window_days: Option<i64>,
    user_agent: Option<String>,
    yahoo_search_base: Option<String>,
    wikipedia_api: Option<String>,
    google_news_base: Option<String>,
    duckduckgo_base: Option<String>,
    gemini_api_base: Option<String>,
}

impl ResearchConfigBuilder {
    /// Set the hosted model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens per model turn
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set max model turns
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the report shape
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Set the lookup tool timeout
    pub fn tool_timeout(mut self, duration: Duration) -> Self {
        self.tool_timeout = Some(duration);
        self
    }

    /// Set the model call timeout
    pub fn model_timeout(mut self, duration: Duration) -> Self {
        self.model_timeout = Some(duration);
        self
    }

    /// Set the news entry limit
    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Set the summary sentence count
    pub fn summary_sentences(mut self, sentences: usize) -> Self {
        self.summary_sentences = Some(sentences);
        self
    }

    /// Set the autocomplete quote count
    pub fn quotes_count(mut self, count: usize) -> Self {
        self.quotes_count = Some(count);
        self
    }

    /// Set the price history window in days
    pub fn price_window_days(mut self, days: i64) -> Self {
        self.price_window_days = Some(days);
        self
    }

    /// Set the lookup User-Agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the ticker autocomplete base URL
    pub fn yahoo_search_base(mut self, url: impl Into<String>) -> Self {
        self.yahoo_search_base = Some(url.into());
        self
    }

    /// Set the MediaWiki API endpoint
    pub fn wikipedia_api(mut self, url: impl Into<String>) -> Self {
        self.wikipedia_api = Some(url.into());
        self
    }

    /// Set the Google News base URL
    pub fn google_news_base(mut self, url: impl Into<String>) -> Self {
        self.google_news_base = Some(url.into());
        self
    }

    /// Set the DuckDuckGo base URL
    pub fn duckduckgo_base(mut self, url: impl Into<String>) -> Self {
        self.duckduckgo_base = Some(url.into());
        self
    }

    /// Set the Gemini API base URL
    pub fn gemini_api_base(mut self, url: impl Into<String>) -> Self {
        self.gemini_api_base = Some(url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ResearchConfig> {
        let defaults = ResearchConfig::default();

        let config = ResearchConfig {
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            output_format: self.output_format.unwrap_or(defaults.output_format),
            tool_timeout: self.tool_timeout.unwrap_or(defaults.tool_timeout),
            model_timeout: self.model_timeout.unwrap_or(defaults.model_timeout),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            summary_sentences: self.summary_sentences.unwrap_or(defaults.summary_sentences),
            quotes_count: self.quotes_count.unwrap_or(defaults.quotes_count),
            price_window_days: self.price_window_days.unwrap_or(defaults.price_window_days),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            yahoo_search_base: self.yahoo_search_base.unwrap_or(defaults.yahoo_search_base),
            wikipedia_api: self.wikipedia_api.unwrap_or(defaults.wikipedia_api),
            google_news_base: self.google_news_base.unwrap_or(defaults.google_news_base),
            duckduckgo_base: self.duckduckgo_base.unwrap_or(defaults.duckduckgo_base),
            gemini_api_base: self.gemini_api_base.unwrap_or(defaults.gemini_api_base),
        };

        config.validate()?;
        Ok(config)
    }
}
