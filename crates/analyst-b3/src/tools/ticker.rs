//! B3 ticker lookup via the Yahoo Finance autocomplete

use super::blank_argument;
use crate::api::YahooSearchClient;
use analyst_core::Result as AgentResult;
use analyst_llm::tools::schema;
use analyst_tools::{Tool, text_argument};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, warn};

const DESCRIPTION: &str = "PRIORIDADE MÁXIMA: Use esta ferramenta para obter o ticker oficial da B3 (.SA). \
Busca diretamente no autocomplete do Yahoo Finance, é a mais precisa e rápida. \
Sempre prefira esta sobre 'busca_ticker_duckduckgo'. \
Exemplos: \"petrobras\" → \"PETR4.SA\"; \"vale\" → \"VALE3.SA\"; \"minerva\" → \"BEEF3.SA\". \
Retorna apenas o ticker ou mensagem clara se não encontrar.";

/// Finds the first `.SA` symbol for a company name
pub struct TickerTool {
    client: YahooSearchClient,
}

impl TickerTool {
    pub fn new(client: YahooSearchClient) -> Self {
        Self { client }
    }

    async fn lookup(&self, empresa: &str) -> String {
        match self.client.find_b3_ticker(empresa).await {
            Ok(Some(ticker)) => {
                info!(empresa, ticker = %ticker, "Ticker found");
                ticker
            }
            Ok(None) => format!("Nenhum ticker .SA encontrado para '{empresa}'."),
            Err(e) => {
                warn!(empresa, error = %e, "Yahoo ticker search failed");
                format!("Erro ao buscar ticker no Yahoo Finance: {e}")
            }
        }
    }
}

#[async_trait]
impl Tool for TickerTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let empresa = text_argument(&params, "empresa")?;
        if empresa.is_empty() {
            return Ok(blank_argument("empresa"));
        }
        Ok(Value::String(self.lookup(&empresa).await))
    }

    fn name(&self) -> &str {
        "buscar_ticker_empresa"
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
