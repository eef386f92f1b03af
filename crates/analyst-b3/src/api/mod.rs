//! API clients for the company lookup services

pub mod duckduckgo;
pub mod google_news;
pub mod wikipedia;
pub mod yahoo;

pub use duckduckgo::{DuckDuckGoClient, SearchResult};
pub use google_news::{FeedEntry, GoogleNewsClient};
pub use wikipedia::WikipediaClient;
pub use yahoo::{DailyClose, PriceHistory, YahooHistory, YahooSearchClient};

use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use url::Url;

/// HTTP client shared by every lookup client
///
/// Carries the browser User-Agent and the per-call tool timeout.
pub fn http_client(config: &ResearchConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.tool_timeout)
        .build()?)
}

/// Join `path` onto `base` and append query pairs
pub(crate) fn endpoint(base: &str, path: &str, query: &[(&str, &str)]) -> Result<Url> {
    let raw = format!("{}{}", base.trim_end_matches('/'), path);
    let mut url = Url::parse(&raw)
        .map_err(|e| ResearchError::ConfigError(format!("invalid URL {raw}: {e}")))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// GET `url` and fail on non-2xx statuses
pub(crate) async fn get_text(client: &reqwest::Client, url: Url) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}
