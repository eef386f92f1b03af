//! Report model returned by the research agent

use crate::error::{ResearchError, Result};
use analyst_llm::tools::schema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Max news items kept in a structured report
pub const MAX_REPORT_NEWS: usize = 3;

fn default_currency() -> String {
    "BRL".to_string()
}

/// One news headline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
}

/// Structured company report
///
/// Field names on the wire stay in Portuguese; `preco_acao` and `noticias`
/// are always present and serialize as `null` when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyReport {
    #[serde(rename = "nome_empresa")]
    pub company_name: String,

    #[serde(rename = "resumo_empresa")]
    pub summary: String,

    #[serde(rename = "preco_acao", default)]
    pub stock_price: Option<f64>,

    #[serde(rename = "moeda", default = "default_currency")]
    pub currency: String,

    #[serde(rename = "noticias", default)]
    pub news: Option<Vec<NewsItem>>,
}

impl CompanyReport {
    /// Response schema sent with the structured turn
    pub fn schema() -> Value {
        let news_item = schema::object(
            json!({
                "title": schema::string("Título da notícia"),
                "link": schema::string("URL da notícia"),
            }),
            vec!["title", "link"],
        );

        schema::object(
            json!({
                "nome_empresa": schema::string("Razão social oficial da empresa"),
                "resumo_empresa": schema::string("Resumo da empresa"),
                "preco_acao": schema::nullable(schema::number(
                    "Último preço de fechamento da ação, ou null",
                )),
                "moeda": schema::string("Moeda do preço, normalmente BRL"),
                "noticias": schema::nullable(schema::array(
                    "Até 3 notícias recentes, ou null",
                    news_item,
                )),
            }),
            vec!["nome_empresa", "resumo_empresa", "preco_acao", "moeda", "noticias"],
        )
    }

    /// Parse the model's JSON answer
    ///
    /// Tolerates a surrounding Markdown code fence.
    pub fn from_json(text: &str) -> Result<Self> {
        let body = strip_code_fence(text);
        serde_json::from_str(body).map_err(|e| {
            ResearchError::StructuredOutput(format!("invalid report JSON: {e}"))
        })
    }

    /// Drop exact duplicate news items, keep at most three and default the currency
    pub fn normalize(mut self) -> Self {
        if self.currency.trim().is_empty() {
            self.currency = default_currency();
        }

        if let Some(items) = self.news.take() {
            let mut unique: Vec<NewsItem> = Vec::with_capacity(MAX_REPORT_NEWS);
            for item in items {
                if unique.len() == MAX_REPORT_NEWS {
                    break;
                }
                if !unique.contains(&item) {
                    unique.push(item);
                }
            }
            self.news = Some(unique);
        }

        self
    }

    /// Two-space indented JSON, non-ASCII kept as-is
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json") on the opening fence line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Final output of a research run
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// Markdown text written by the model
    Markdown(String),
    /// Parsed structured report
    Structured(CompanyReport),
}

impl Report {
    /// Markdown body, if this is a Markdown report
    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            Report::Markdown(text) => Some(text),
            Report::Structured(_) => None,
        }
    }

    /// Text form: Markdown as-is, structured as pretty JSON
    pub fn render(&self) -> Result<String> {
        match self {
            Report::Markdown(text) => Ok(text.clone()),
            Report::Structured(report) => report.to_pretty_json(),
        }
    }
}
