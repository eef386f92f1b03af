//! Fallback B3 ticker lookup via web search

use super::blank_argument;
use crate::api::DuckDuckGoClient;
use crate::error::{ResearchError, Result};
use analyst_core::Result as AgentResult;
use analyst_llm::tools::schema;
use analyst_tools::{Tool, text_argument};
use async_trait::async_trait;
use regex::Regex;
use serde_json::{Value, json};
use tracing::{info, warn};

const DESCRIPTION: &str = "USE APENAS COMO RESERVA se 'buscar_ticker_empresa' falhar. \
Busca o ticker da empresa na B3 via DuckDuckGo como fallback. \
Menos precisa que a busca direta no Yahoo Finance.";

/// Extracts a B3 symbol from web search results
pub struct TickerFallbackTool {
    search: DuckDuckGoClient,
    ticker_re: Regex,
}

impl TickerFallbackTool {
    pub fn new(search: DuckDuckGoClient) -> Result<Self> {
        let ticker_re = Regex::new(r"\b([A-Z]{4}\d{1,2})(?:\.SA)?\b")
            .map_err(|e| ResearchError::Other(format!("invalid pattern: {e}")))?;
        Ok(Self { search, ticker_re })
    }

    /// First B3 symbol in `text`, with the `.SA` suffix
    fn extract_ticker(&self, text: &str) -> Option<String> {
        self.ticker_re
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| format!("{}.SA", m.as_str()))
    }

    async fn lookup(&self, empresa: &str) -> String {
        let query = format!(
            "ticker {empresa} B3 site:yahoo.com OR site:statusinvest.com.br OR site:investing.com"
        );
        match self.search.search_text(&query).await {
            Ok(text) => match self.extract_ticker(&text) {
                Some(ticker) => {
                    info!(empresa, ticker = %ticker, "Fallback ticker found");
                    ticker
                }
                None => format!("Nenhum ticker .SA encontrado via DuckDuckGo para '{empresa}'."),
            },
            Err(e) => {
                warn!(empresa, error = %e, "Fallback ticker search failed");
                format!("Erro ao buscar ticker via DuckDuckGo: {e}")
            }
        }
    }
}

#[async_trait]
impl Tool for TickerFallbackTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let empresa = text_argument(&params, "empresa")?;
        if empresa.is_empty() {
            return Ok(blank_argument("empresa"));
        }
        Ok(Value::String(self.lookup(&empresa).await))
    }

    fn name(&self) -> &str {
        "busca_ticker_duckduckgo"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "empresa": schema::string("Nome ou razão social da empresa"),
            }),
            vec!["empresa"],
        )
    }
}
