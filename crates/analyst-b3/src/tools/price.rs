//! Latest closing price of a B3 ticker

use super::blank_argument;
use crate::api::PriceHistory;
use crate::config::ResearchConfig;
use crate::error::ResearchError;
use analyst_core::Result as AgentResult;
use analyst_llm::tools::schema;
use analyst_tools::{Tool, text_argument};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DESCRIPTION: &str = "Retorna o preço de fechamento mais recente da ação na B3 (em R$). \
USE APENAS com ticker válido (ex: \"VALE3.SA\", \"PETR4.SA\"). \
Nunca passe nome da empresa aqui, só o código!";

/// Reports the most recent daily close
pub struct PriceTool {
    history: Arc<dyn PriceHistory>,
    window_days: i64,
    timeout: Duration,
}

impl PriceTool {
    pub fn new(history: Arc<dyn PriceHistory>, config: &ResearchConfig) -> Self {
        Self {
            history,
            window_days: config.price_window_days,
            timeout: config.tool_timeout,
        }
    }

    async fn lookup(&self, ticker: &str) -> String {
        let ticker = ticker.to_uppercase();

        let closes = match tokio::time::timeout(
            self.timeout,
            self.history.daily_closes(&ticker, self.window_days),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ResearchError::Timeout(self.timeout.as_secs())),
        };

        match closes {
            Ok(closes) => match closes.last() {
                Some(last) => {
                    info!(ticker = %ticker, close = last.close, "Price found");
                    format!("{ticker} fechou em R$ {:.2}", last.close)
                }
                None => format!(
                    "Sem dados de preço para {ticker} (pode estar suspensa ou sem negociação recente)."
                ),
            },
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Price lookup failed");
                format!("Erro ao obter preço de {ticker}: {e}")
            }
        }
    }
}

#[async_trait]
impl Tool for PriceTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let ticker = text_argument(&params, "ticker")?;
        if ticker.is_empty() {
            return Ok(blank_argument("ticker"));
        }
        Ok(Value::String(self.lookup(&ticker).await))
    }

    fn name(&self) -> &str {
        "preco_acao_empresa"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Ticker da B3 com sufixo .SA (ex: VALE3.SA)"),
            }),
            vec!["ticker"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DailyClose;
    use crate::api::yahoo::MockPriceHistory;
    use chrono::{DateTime, Utc};
    use mockall::predicate::eq;

    fn close(day: i64, value: f64) -> DailyClose {
        DailyClose {
            timestamp: DateTime::<Utc>::from_timestamp(1_700_000_000 + day * 86_400, 0).unwrap(),
            close: value,
        }
    }

    fn tool(mock: MockPriceHistory) -> PriceTool {
        PriceTool::new(Arc::new(mock), &ResearchConfig::default())
    }

    #[tokio::test]
    async fn test_uses_last_close_and_uppercases() {
        let mut mock = MockPriceHistory::new();
        mock.expect_daily_closes()
            .with(eq("MGLU3.SA"), eq(7))
            .times(1)
            .returning(|_, _| Ok(vec![close(0, 9.87), close(1, 10.456)]));

        let result = tool(mock)
            .execute(json!({ "ticker": "mglu3.sa" }))
            .await
            .unwrap();
        assert_eq!(result, json!("MGLU3.SA fechou em R$ 10.46"));
    }

    #[tokio::test]
    async fn test_empty_history() {
        let mut mock = MockPriceHistory::new();
        mock.expect_daily_closes().returning(|_, _| Ok(vec![]));

        let result = tool(mock)
            .execute(json!({ "ticker": "OIBR3.SA" }))
            .await
            .unwrap();
        assert_eq!(
            result,
            json!("Sem dados de preço para OIBR3.SA (pode estar suspensa ou sem negociação recente).")
        );
    }

    #[tokio::test]
    async fn test_history_error_is_a_sentence() {
        let mut mock = MockPriceHistory::new();
        mock.expect_daily_closes().returning(|_, _| {
            Err(ResearchError::YahooFinanceError(
                "fetching the data from yahoo! finance failed".into(),
            ))
        });

        let result = tool(mock)
            .execute(json!({ "ticker": "xxxx3.sa" }))
            .await
            .unwrap();
        let text = result.as_str().unwrap();
        assert!(text.starts_with("Erro ao obter preço de XXXX3.SA: "));
    }

    #[tokio::test]
    async fn test_blank_ticker() {
        let mock = MockPriceHistory::new();
        let result = tool(mock).execute(json!({ "ticker": "  " })).await.unwrap();
        assert_eq!(result, json!("Informe um valor não vazio para 'ticker'."));
    }

    #[tokio::test]
    async fn test_missing_argument_is_error() {
        let mock = MockPriceHistory::new();
        assert!(tool(mock).execute(json!({ "symbol": "VALE3.SA" })).await.is_err());
    }
}
