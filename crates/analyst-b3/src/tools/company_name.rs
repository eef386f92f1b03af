//! Official company name lookup via web search

use super::blank_argument;
use crate::api::DuckDuckGoClient;
use analyst_core::Result as AgentResult;
use analyst_llm::tools::schema;
use analyst_tools::{Tool, text_argument};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::warn;

const DESCRIPTION: &str = "USE SEMPRE PRIMEIRO quando o nome fornecido for ambíguo, apelido ou incompleto. \
Retorna a razão social oficial da empresa brasileira usando busca no DuckDuckGo. \
Extraia o nome completo (ex: \"Minerva S.A.\", \"Magazine Luiza S.A.\"). \
Exemplos: \"minerva\" → \"Minerva S.A.\"; \"magalu\" ou \"magazine luiza\" → \"Magazine Luiza S.A.\"; \
\"itau\" → \"Itaú Unibanco Holding S.A.\". \
Chame esta ferramenta antes de qualquer outra se houver dúvida sobre o nome oficial.";

/// Searches the web for a company's registered name
pub struct CompanyNameTool {
    search: DuckDuckGoClient,
}

impl CompanyNameTool {
    pub fn new(search: DuckDuckGoClient) -> Self {
        Self { search }
    }

    async fn lookup(&self, empresa: &str) -> String {
        let query = format!("razão social oficial empresa {empresa} Brasil");
        match self.search.search_text(&query).await {
            Ok(text) if text.is_empty() => {
                format!("Nenhum resultado encontrado no DuckDuckGo para '{empresa}'.")
            }
            Ok(text) => text,
            Err(e) => {
                warn!(empresa, error = %e, "Company name search failed");
                format!("Erro ao buscar nome oficial via DuckDuckGo: {e}")
            }
        }
    }
}

#[async_trait]
impl Tool for CompanyNameTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let empresa = text_argument(&params, "empresa")?;
        if empresa.is_empty() {
            return Ok(blank_argument("empresa"));
        }
        Ok(Value::String(self.lookup(&empresa).await))
    }

    fn name(&self) -> &str {
        "buscar_nome_empresa"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "empresa": schema::string("Nome, apelido ou nome parcial da empresa"),
            }),
            vec!["empresa"],
        )
    }
}
