//! Company lookup tools bound to the research agent
//!
//! Every tool answers with a string. Lookup failures are turned into a
//! Portuguese sentence for the model; only malformed arguments are returned
//! as errors.

pub mod company_name;
pub mod news;
pub mod price;
pub mod summary;
pub mod ticker;
pub mod ticker_fallback;

pub use company_name::CompanyNameTool;
pub use news::NewsTool;
pub use price::PriceTool;
pub use summary::SummaryTool;
pub use ticker::TickerTool;
pub use ticker_fallback::TickerFallbackTool;

use crate::api::{
    DuckDuckGoClient, GoogleNewsClient, PriceHistory, WikipediaClient, YahooHistory,
    YahooSearchClient, http_client,
};
use crate::config::ResearchConfig;
use crate::error::Result;
use analyst_tools::{Tool, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;

/// The six lookup tools, in the order they are offered to the model
pub fn get_tools(config: &ResearchConfig) -> Result<Vec<Arc<dyn Tool>>> {
    get_tools_with(config, Arc::new(YahooHistory::new()))
}

/// Same as [`get_tools`] with a custom price history source
pub fn get_tools_with(
    config: &ResearchConfig,
    prices: Arc<dyn PriceHistory>,
) -> Result<Vec<Arc<dyn Tool>>> {
    let client = http_client(config)?;
    let search = DuckDuckGoClient::new(client.clone(), config)?;

    Ok(vec![
        Arc::new(CompanyNameTool::new(search.clone())),
        Arc::new(TickerTool::new(YahooSearchClient::new(client.clone(), config))),
        Arc::new(SummaryTool::new(WikipediaClient::new(client.clone(), config))),
        Arc::new(PriceTool::new(prices, config)),
        Arc::new(NewsTool::new(GoogleNewsClient::new(client, config), config)),
        Arc::new(TickerFallbackTool::new(search)?),
    ])
}

/// Registry holding [`get_tools`]
pub fn tool_registry(config: &ResearchConfig) -> Result<ToolRegistry> {
    Ok(ToolRegistry::from_tools(get_tools(config)?))
}

/// Tool answer for a blank argument
pub(crate) fn blank_argument(argument: &str) -> Value {
    Value::String(format!("Informe um valor não vazio para '{argument}'."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_order() {
        let registry = tool_registry(&ResearchConfig::default()).unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "buscar_nome_empresa",
                "buscar_ticker_empresa",
                "resumo_empresa",
                "preco_acao_empresa",
                "noticias_empresa",
                "busca_ticker_duckduckgo",
            ]
        );
    }

    #[test]
    fn test_definitions_have_single_required_argument() {
        let tools = get_tools(&ResearchConfig::default()).unwrap();
        for tool in tools {
            let definition = tool.definition();
            let required = definition.input_schema["required"].as_array().unwrap();
            assert_eq!(required.len(), 1, "{}", definition.name);
            assert!(!definition.description.is_empty());
        }
    }

    #[test]
    fn test_blank_argument_message() {
        assert_eq!(
            blank_argument("ticker"),
            Value::String("Informe um valor não vazio para 'ticker'.".to_string())
        );
    }
}
