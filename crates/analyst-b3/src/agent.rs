//! Research agent wrapping the tool-calling executor

use crate::config::{OutputFormat, ResearchConfig};
use crate::error::Result;
use crate::prompts;
use crate::query::CompanyQuery;
use crate::report::{CompanyReport, Report};
use crate::tools::tool_registry;
use analyst_core::Agent;
use analyst_llm::LLMProvider;
use analyst_runtime::{AgentExecutor, ExecutorConfig, ExecutorEventHandler};
use analyst_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Researches one Brazilian company and produces a report
///
/// The lookup tools are bound to the executor; the model decides which to
/// call. The company typed by the user is rendered into the prompt as-is.
pub struct FinanceAgent {
    executor: AgentExecutor,
    output_format: OutputFormat,
    company: CompanyQuery,
}

impl FinanceAgent {
    /// Create an agent with the standard lookup tools
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        config: ResearchConfig,
        company: &str,
    ) -> Result<Self> {
        let registry = Arc::new(tool_registry(&config)?);
        Self::with_registry(provider, config, company, registry)
    }

    /// Create an agent with a caller-supplied tool registry
    pub fn with_registry(
        provider: Arc<dyn LLMProvider>,
        config: ResearchConfig,
        company: &str,
        registry: Arc<ToolRegistry>,
    ) -> Result<Self> {
        config.validate()?;
        let company = CompanyQuery::parse(company)?;

        let executor_config = ExecutorConfig {
            max_iterations: config.max_iterations,
            model: config.model.clone(),
            system_prompt: None,
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
        };

        Ok(Self {
            executor: AgentExecutor::new(provider, registry, executor_config),
            output_format: config.output_format,
            company,
        })
    }

    /// Receive tool and completion events
    pub fn with_event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.executor.set_event_handler(handler);
        self
    }

    /// Company this agent researches
    pub fn company(&self) -> &CompanyQuery {
        &self.company
    }

    /// Prompt sent as the single user message
    pub fn prompt(&self) -> Result<String> {
        prompts::research_prompt(self.output_format, self.company.as_str())
    }

    /// Run the research and return the report
    pub async fn generate_report(&self) -> Result<Report> {
        self.report_for(&self.company).await
    }

    #[instrument(skip(self, company), fields(company = %company, format = ?self.output_format))]
    async fn report_for(&self, company: &CompanyQuery) -> Result<Report> {
        let prompt = prompts::research_prompt(self.output_format, company.as_str())?;
        info!(model = %self.executor.config().model, "Generating report");

        match self.output_format {
            OutputFormat::Markdown => {
                let text = self.executor.run(prompt).await?;
                Ok(Report::Markdown(text))
            }
            OutputFormat::Structured => {
                let instruction = prompts::format_instruction(company.as_str())?;
                let json = self
                    .executor
                    .run_structured(prompt, CompanyReport::schema(), instruction)
                    .await?;
                let report = CompanyReport::from_json(&json)?.normalize();
                Ok(Report::Structured(report))
            }
        }
    }
}

#[async_trait]
impl Agent for FinanceAgent {
    async fn process(&self, input: String) -> analyst_core::Result<String> {
        let company = CompanyQuery::parse(&input)?;
        let report = self.report_for(&company).await?;
        Ok(report.render()?)
    }

    fn name(&self) -> &str {
        "finance_agent"
    }
}
