//! Company summary from the Portuguese Wikipedia

use super::blank_argument;
use crate::api::WikipediaClient;
use crate::error::ResearchError;
use analyst_core::Result as AgentResult;
use analyst_llm::tools::schema;
use analyst_tools::{Tool, text_argument};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

const DESCRIPTION: &str = "Retorna resumo completo da empresa em português (Wikipédia). \
Use com a razão social oficial ou ticker para melhores resultados. \
Extrai automaticamente: setor de atuação, breve histórico e principais produtos/serviços. \
Ideal para preencher o relatório principal.";

/// Fetches a short encyclopedia summary
pub struct SummaryTool {
    client: WikipediaClient,
}

impl SummaryTool {
    pub fn new(client: WikipediaClient) -> Self {
        Self { client }
    }

    async fn lookup(&self, empresa: &str) -> String {
        match self.client.summary(empresa).await {
            Ok(summary) => summary,
            Err(ResearchError::Ambiguous { options, .. }) => {
                // One retry with the first listed option
                let retry = match options.first() {
                    Some(first) => {
                        debug!(empresa, option = %first, "Retrying with first option");
                        self.client.page_summary(first).await.ok()
                    }
                    None => None,
                };
                retry.unwrap_or_else(|| {
                    format!("Múltiplas páginas encontradas para '{empresa}'. Use o nome completo.")
                })
            }
            Err(ResearchError::NotFound(_)) => {
                format!("Nenhuma página Wikipédia encontrada para '{empresa}'.")
            }
            Err(e) => {
                warn!(empresa, error = %e, "Summary lookup failed");
                format!("Erro ao buscar resumo: {e}")
            }
        }
    }
}

#[async_trait]
impl Tool for SummaryTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let empresa = text_argument(&params, "empresa")?;
        if empresa.is_empty() {
            return Ok(blank_argument("empresa"));
        }
        Ok(Value::String(self.lookup(&empresa).await))
    }

    fn name(&self) -> &str {
        "resumo_empresa"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "empresa": schema::string("Razão social oficial ou ticker da empresa"),
            }),
            vec!["empresa"],
        )
    }
}
