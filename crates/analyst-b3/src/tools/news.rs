//! Recent news headlines from Google News Brasil

use super::blank_argument;
use crate::api::{FeedEntry, GoogleNewsClient};
use crate::config::ResearchConfig;
use analyst_core::Result as AgentResult;
use analyst_llm::tools::schema;
use analyst_tools::{Tool, text_argument};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::warn;

const DESCRIPTION: &str = "Busca até 20 notícias recentes sobre a empresa (Google News Brasil). \
Use preferencialmente com a razão social oficial. \
Retorna título + link já formatados para o relatório.";

/// Lists recent headlines with their links
pub struct NewsTool {
    client: GoogleNewsClient,
    limit: usize,
}

impl NewsTool {
    pub fn new(client: GoogleNewsClient, config: &ResearchConfig) -> Self {
        Self {
            client,
            limit: config.news_limit,
        }
    }

    async fn lookup(&self, empresa: &str) -> String {
        match self.client.search(empresa).await {
            Ok(entries) => format_entries(&entries, self.limit),
            Err(e) => {
                warn!(empresa, error = %e, "News lookup failed");
                format!("Erro ao buscar notícias: {e}")
            }
        }
    }
}

fn format_entries(entries: &[FeedEntry], limit: usize) -> String {
    if entries.is_empty() {
        return "Nenhuma notícia encontrada.".to_string();
    }
    entries
        .iter()
        .take(limit)
        .map(|e| format!("- {}\n  {}", e.title, e.link))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for NewsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let empresa = text_argument(&params, "empresa")?;
        if empresa.is_empty() {
            return Ok(blank_argument("empresa"));
        }
        Ok(Value::String(self.lookup(&empresa).await))
    }

    fn name(&self) -> &str {
        "noticias_empresa"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "empresa": schema::string("Razão social oficial da empresa"),
            }),
            vec!["empresa"],
        )
    }
}
