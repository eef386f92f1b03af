//! Yahoo Finance clients: ticker autocomplete and daily price history

use super::{endpoint, get_text};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    #[serde(default)]
    symbol: Option<String>,
}

/// Client for the Yahoo Finance search autocomplete endpoint
#[derive(Debug, Clone)]
pub struct YahooSearchClient {
    client: reqwest::Client,
    base_url: String,
    quotes_count: usize,
}

impl YahooSearchClient {
    /// Create a new search client
    pub fn new(client: reqwest::Client, config: &ResearchConfig) -> Self {
        Self {
            client,
            base_url: config.yahoo_search_base.clone(),
            quotes_count: config.quotes_count,
        }
    }

    /// Symbols returned for `query`, in ranking order
    pub async fn search_symbols(&self, query: &str) -> Result<Vec<String>> {
        let quotes_count = self.quotes_count.to_string();
        let url = endpoint(
            &self.base_url,
            "/v1/finance/search",
            &[("q", query), ("quotesCount", &quotes_count), ("newsCount", "0")],
        )?;

        let body = get_text(&self.client, url).await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        let symbols: Vec<String> = response
            .quotes
            .into_iter()
            .filter_map(|q| q.symbol)
            .collect();
        debug!(query, count = symbols.len(), "Yahoo search returned symbols");
        Ok(symbols)
    }

    /// First symbol listed on B3 (`.SA` suffix)
    pub async fn find_b3_ticker(&self, query: &str) -> Result<Option<String>> {
        Ok(self
            .search_symbols(query)
            .await?
            .into_iter()
            .find(|s| s.ends_with(".SA")))
    }
}

/// One daily closing price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyClose {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Source of recent daily closes for a ticker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceHistory: Send + Sync {
    /// Daily closes over the last `days` calendar days, oldest first
    async fn daily_closes(&self, ticker: &str, days: i64) -> Result<Vec<DailyClose>>;
}

/// Price history backed by the Yahoo chart API
#[derive(Debug, Default, Clone, Copy)]
pub struct YahooHistory;

impl YahooHistory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PriceHistory for YahooHistory {
    async fn daily_closes(&self, ticker: &str, days: i64) -> Result<Vec<DailyClose>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| ResearchError::YahooFinanceError(e.to_string()))?;

        let end = Utc::now();
        let start = end - Duration::days(days);

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp()).map_err(|e| {
            ResearchError::YahooFinanceError(format!("Invalid start timestamp: {e}"))
        })?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp()).map_err(|e| {
            ResearchError::YahooFinanceError(format!("Invalid end timestamp: {e}"))
        })?;

        let response = provider
            .get_quote_history(ticker, start_odt, end_odt)
            .await
            .map_err(|e| ResearchError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| ResearchError::YahooFinanceError(e.to_string()))?;

        Ok(clean_closes(quotes.iter().map(|q| {
            (
                DateTime::from_timestamp(q.timestamp as i64, 0).unwrap_or_else(Utc::now),
                q.close,
            )
        })))
    }
}

/// Keep finite, positive closes sorted by time
pub(crate) fn clean_closes(
    raw: impl IntoIterator<Item = (DateTime<Utc>, f64)>,
) -> Vec<DailyClose> {
    let mut closes: Vec<DailyClose> = raw
        .into_iter()
        .filter(|(_, close)| close.is_finite() && *close > 0.0)
        .map(|(timestamp, close)| DailyClose { timestamp, close })
        .collect();
    closes.sort_by_key(|c| c.timestamp);
    closes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_closes_filters_and_sorts() {
        let day = |d: i64| DateTime::from_timestamp(1_700_000_000 + d * 86_400, 0).unwrap();
        let closes = clean_closes(vec![
            (day(2), 10.5),
            (day(0), f64::NAN),
            (day(1), 10.0),
            (day(3), 0.0),
        ]);
        assert_eq!(closes.len(), 2);
        assert_eq!(closes[0].close, 10.0);
        assert_eq!(closes[1].close, 10.5);
    }

    #[test]
    fn test_search_response_tolerates_missing_symbol() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"quotes":[{"shortname":"x"},{"symbol":"VALE3.SA"}]}"#)
                .unwrap();
        let symbols: Vec<_> = response.quotes.into_iter().filter_map(|q| q.symbol).collect();
        assert_eq!(symbols, vec!["VALE3.SA"]);
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_history() {
        let closes = YahooHistory::new().daily_closes("VALE3.SA", 7).await.unwrap();
        assert!(!closes.is_empty());
    }
}
