//! Brazilian company research agent
//!
//! This crate turns a company name into a research report by letting a
//! hosted model drive six lookup tools:
//!
//! - Official name search (DuckDuckGo)
//! - B3 ticker lookup (Yahoo Finance autocomplete, DuckDuckGo as fallback)
//! - Company summary (Portuguese Wikipedia)
//! - Latest closing price (Yahoo Finance chart history)
//! - Recent headlines (Google News Brasil RSS)
//!
//! The report is either Markdown written by the model or a [`CompanyReport`]
//! obtained through a schema-constrained closing turn.
//!
//! # Example
//!
//! ```rust,ignore
//! use analyst_b3::{FinanceAgent, Report, ResearchConfig};
//! use analyst_llm::providers::GeminiProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(GeminiProvider::from_env()?);
//!     let agent = FinanceAgent::new(provider, ResearchConfig::default(), "magalu")?;
//!
//!     if let Report::Markdown(text) = agent.generate_report().await? {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod prompts;
pub mod query;
pub mod report;
pub mod tools;

pub use agent::FinanceAgent;
pub use api::{DailyClose, PriceHistory, YahooHistory};
pub use config::{OutputFormat, ResearchConfig, ResearchConfigBuilder};
pub use error::{ResearchError, Result};
pub use query::CompanyQuery;
pub use report::{CompanyReport, NewsItem, Report};
pub use tools::{get_tools, get_tools_with, tool_registry};
