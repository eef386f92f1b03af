//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history and available tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return final response
//!
//! [`AgentExecutor::run_structured`] adds one more turn after the loop: the
//! final answer is re-requested without tools under a JSON response schema.

use crate::events::ExecutorEventHandler;
use analyst_core::{Error, Result};
use analyst_llm::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, ContentBlock, LLMProvider,
    Message, StopReason, TokenUsage,
};
use analyst_tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of model turns (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "gemini-2.5-flash".to_string(),
            system_prompt: None,
            max_tokens: 8192,
            temperature: Some(0.2),
        }
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
            event_handler: None,
        }
    }

    /// Set the event handler for receiving execution events
    pub fn with_event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Set the event handler (mutable reference version)
    pub fn set_event_handler(&mut self, handler: Arc<dyn ExecutorEventHandler>) {
        self.event_handler = Some(handler);
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute the agent loop with a user query
    ///
    /// Returns the text of the final assistant turn.
    pub async fn run(&self, user_message: String) -> Result<String> {
        let conversation = vec![Message::user(user_message)];
        let (text, usage) = self.run_conversation(conversation).await?;
        info!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Agent run finished"
        );
        Ok(text)
    }

    /// Execute the agent loop, then ask for the answer as schema-constrained JSON
    ///
    /// The closing turn carries the original request, the loop's final answer
    /// and `format_instruction`, with no tools and `schema` as the response
    /// schema. The raw JSON text is returned; parsing is left to the caller.
    pub async fn run_structured(
        &self,
        user_message: String,
        schema: Value,
        format_instruction: String,
    ) -> Result<String> {
        let (answer, mut usage) = self
            .run_conversation(vec![Message::user(user_message.clone())])
            .await?;

        info!("Requesting structured answer");
        let request = self
            .request_builder(vec![
                Message::user(user_message),
                Message::assistant(answer),
                Message::user(format_instruction),
            ])
            .response_schema(schema)
            .build();

        let response = self.complete(request).await?;
        usage.add(response.usage);
        info!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Structured run finished"
        );

        match response.stop_reason {
            StopReason::EndTurn | StopReason::StopSequence => {}
            StopReason::MaxTokens => {
                return Err(self
                    .fail("Structured answer truncated due to token limit".to_string())
                    .await);
            }
            StopReason::Safety => {
                return Err(self
                    .fail("Structured answer blocked by safety filters".to_string())
                    .await);
            }
            StopReason::ToolUse => {
                return Err(self
                    .fail("Model requested a tool during the structured turn".to_string())
                    .await);
            }
        }

        let text = response.message.text().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(self.fail("Model returned an empty structured answer".to_string()).await);
        }

        if let Some(handler) = &self.event_handler {
            handler.on_complete(&text).await;
        }
        Ok(text)
    }

    fn request_builder(&self, messages: Vec<Message>) -> CompletionRequestBuilder {
        let mut builder = CompletionRequest::builder(&self.config.model)
            .messages(messages)
            .max_tokens(self.config.max_tokens);
        if let Some(system) = &self.config.system_prompt {
            builder = builder.system(system.clone());
        }
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        builder
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        info!(
            model = %self.config.model,
            max_tokens = self.config.max_tokens,
            temperature = ?self.config.temperature,
            tool_count = request.tools.as_ref().map_or(0, Vec::len),
            structured = request.response_schema.is_some(),
            "Sending request to LLM"
        );

        match self.provider.complete(request).await {
            Ok(response) => {
                info!(
                    stop_reason = ?response.stop_reason,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM response received"
                );
                Ok(response)
            }
            Err(e) => Err(self.fail(format!("LLM request failed: {e}")).await),
        }
    }

    async fn fail(&self, message: String) -> Error {
        warn!(error = %message, "Agent run failed");
        if let Some(handler) = &self.event_handler {
            handler.on_error(&message).await;
        }
        Error::ProcessingFailed(message)
    }

    /// Run the loop until the model ends its turn
    async fn run_conversation(
        &self,
        initial_conversation: Vec<Message>,
    ) -> Result<(String, TokenUsage)> {
        let mut conversation = initial_conversation;
        let mut usage = TokenUsage::default();
        let tools = self.tool_registry.definitions();
        debug!(tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration = iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            if let Some(last_msg) = conversation.last() {
                let msg_preview: String = last_msg
                    .text()
                    .unwrap_or_default()
                    .chars()
                    .take(200)
                    .collect();
                debug!(
                    role = ?last_msg.role,
                    message_preview = %msg_preview,
                    "Processing message"
                );
            }

            let request = self
                .request_builder(conversation.clone())
                .tools(tools.clone())
                .build();
            let response = self.complete(request).await?;
            usage.add(response.usage);

            let response_preview: String = response
                .message
                .text()
                .unwrap_or_default()
                .chars()
                .take(300)
                .collect();
            debug!(
                response_preview = %response_preview,
                "LLM response content preview"
            );

            conversation.push(response.message.clone());

            match response.stop_reason {
                StopReason::EndTurn | StopReason::StopSequence => {
                    let text = response.message.text().unwrap_or_default();
                    if text.trim().is_empty() {
                        return Err(self.fail("Model returned an empty response".to_string()).await);
                    }
                    info!(
                        iteration = iteration,
                        response_length = text.len(),
                        "Agent completed naturally"
                    );
                    if let Some(handler) = &self.event_handler {
                        handler.on_complete(&text).await;
                    }
                    return Ok((text, usage));
                }

                StopReason::ToolUse => {
                    let tool_results = self.execute_tools(&response.message).await?;
                    if tool_results.is_empty() {
                        return Err(self
                            .fail("No tool calls despite ToolUse stop reason".to_string())
                            .await);
                    }
                    info!(
                        result_count = tool_results.len(),
                        "Tool execution completed, continuing agent loop"
                    );
                    conversation.push(Message::tool_results(tool_results));
                }

                StopReason::MaxTokens => {
                    warn!("Hit max tokens in LLM response");
                    let text = response.message.text().unwrap_or_default();
                    if text.trim().is_empty() {
                        return Err(self
                            .fail("Response truncated due to token limit".to_string())
                            .await);
                    }
                    return Ok((text, usage));
                }

                StopReason::Safety => {
                    return Err(self
                        .fail("Response blocked by safety filters".to_string())
                        .await);
                }
            }
        }

        Err(self
            .fail(format!(
                "Max iterations ({}) reached without completion",
                self.config.max_iterations
            ))
            .await)
    }

    /// Execute the tool calls of an assistant message, one after another
    ///
    /// Tool errors become error results for the model; a tool name with no
    /// registered tool aborts the run.
    async fn execute_tools(&self, message: &Message) -> Result<Vec<ContentBlock>> {
        let mut results = Vec::new();
        let tool_uses = message.tool_uses();
        info!(tool_count = tool_uses.len(), "Starting tool execution");

        for tool_use in tool_uses {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            let input_preview: String = input.to_string().chars().take(500).collect();
            info!(
                tool_name = %name,
                tool_id = %id,
                input_preview = %input_preview,
                "Executing tool"
            );

            if let Some(handler) = &self.event_handler {
                handler.on_tool_start(id, name, input).await;
            }

            let Some(tool) = self.tool_registry.get(name) else {
                return Err(self.fail(format!("Tool not found: {name}")).await);
            };

            let start_time = std::time::Instant::now();
            let outcome = tool.execute(input.clone()).await;
            let duration_ms = start_time.elapsed().as_millis() as u64;

            match outcome {
                Ok(result) => {
                    let result_str = match result {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    let result_preview: String = result_str.chars().take(500).collect();
                    info!(
                        tool_name = %name,
                        duration_ms = duration_ms,
                        result_length = result_str.len(),
                        result_preview = %result_preview,
                        "Tool execution succeeded"
                    );

                    if let Some(handler) = &self.event_handler {
                        handler
                            .on_tool_done(id, name, input, Ok(&result_str), duration_ms)
                            .await;
                    }
                    results.push(ContentBlock::tool_result(id.clone(), result_str));
                }
                Err(e) => {
                    let error_str = format!("Error: {e}");
                    warn!(
                        tool_name = %name,
                        duration_ms = duration_ms,
                        error = %e,
                        "Tool execution failed"
                    );

                    if let Some(handler) = &self.event_handler {
                        handler
                            .on_tool_done(id, name, input, Err(&error_str), duration_ms)
                            .await;
                    }
                    results.push(ContentBlock::tool_error(id.clone(), error_str));
                }
            }
        }

        Ok(results)
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
            event_handler: None,
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the event handler
    pub fn event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        if self.config.max_iterations == 0 {
            return Err(Error::InitializationFailed(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        let mut executor = AgentExecutor::new(provider, self.tool_registry, self.config);
        if let Some(handler) = self.event_handler {
            executor.set_event_handler(handler);
        }
        Ok(executor)
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ToolTrace;
    use analyst_llm::tools::schema;
    use analyst_llm::{LLMError, MessageContent};
    use analyst_tools::{Tool, text_argument};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider that replays canned responses and records every request
    struct ScriptedProvider {
        responses: Mutex<VecDeque<CompletionResponse>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<CompletionResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> analyst_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LLMError::RequestFailed("script exhausted".to_string()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct Upper;

    #[async_trait]
    impl Tool for Upper {
        async fn execute(&self, params: Value) -> Result<Value> {
            let ticker = text_argument(&params, "ticker")?;
            Ok(Value::String(ticker.to_uppercase()))
        }

        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "Upper-cases a ticker"
        }

        fn input_schema(&self) -> Value {
            schema::object(json!({ "ticker": schema::string("ticker") }), vec!["ticker"])
        }
    }

    fn text(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant_blocks(vec![ContentBlock::Text {
                text: text.to_string(),
            }]),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }
    }

    fn call(id: &str, name: &str, input: Value) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant_blocks(vec![ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input,
            }]),
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    fn executor(provider: Arc<ScriptedProvider>) -> AgentExecutorBuilder {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(Upper));
        AgentExecutorBuilder::new()
            .provider(provider)
            .tool_registry(Arc::new(registry))
    }

    #[test]
    fn test_builder() {
        let builder = AgentExecutorBuilder::new()
            .model("gemini-2.5-pro")
            .max_iterations(5)
            .system_prompt("Analista");

        assert_eq!(builder.config.model, "gemini-2.5-pro");
        assert_eq!(builder.config.max_iterations, 5);
        assert_eq!(builder.config.system_prompt, Some("Analista".to_string()));
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.temperature, Some(0.2));
    }

    #[test]
    fn test_build_requires_provider() {
        assert!(matches!(
            AgentExecutorBuilder::new().build(),
            Err(Error::InitializationFailed(_))
        ));
    }

    #[tokio::test]
    async fn tool_results_are_fed_back() {
        let provider = ScriptedProvider::new(vec![
            call("c1", "upper", json!({ "ticker": "petr4.sa" })),
            text("PETR4.SA fechou em R$ 38.10"),
        ]);
        let trace = Arc::new(ToolTrace::new());
        let exec = executor(provider.clone())
            .event_handler(trace.clone())
            .build()
            .unwrap();

        let out = exec.run("Petrobras".to_string()).await.unwrap();
        assert_eq!(out, "PETR4.SA fechou em R$ 38.10");

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].tools.as_ref().unwrap()[0].name, "upper");
        assert_eq!(requests[0].temperature, Some(0.2));

        let fed_back = requests[1].messages.last().unwrap();
        match &fed_back.content {
            Some(MessageContent::Blocks(blocks)) => {
                assert_eq!(blocks[0], ContentBlock::tool_result("c1", "PETR4.SA"));
            }
            other => panic!("unexpected content {other:?}"),
        }
        assert_eq!(trace.tool_names(), vec!["upper"]);
    }

    #[tokio::test]
    async fn invalid_arguments_become_error_results() {
        let provider = ScriptedProvider::new(vec![
            call("c1", "upper", json!({ "symbol": "x" })),
            text("sem ticker"),
        ]);
        let trace = Arc::new(ToolTrace::new());
        let exec = executor(provider.clone())
            .event_handler(trace.clone())
            .build()
            .unwrap();

        assert_eq!(exec.run("x".to_string()).await.unwrap(), "sem ticker");
        assert!(trace.calls()[0].is_error);

        let fed_back = provider.requests()[1].messages.last().cloned().unwrap();
        let Some(MessageContent::Blocks(blocks)) = fed_back.content else {
            panic!("expected tool result blocks");
        };
        assert!(matches!(
            blocks[0],
            ContentBlock::ToolResult {
                is_error: Some(true),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unknown_tool_aborts() {
        let provider = ScriptedProvider::new(vec![call("c1", "nao_existe", json!({}))]);
        let exec = executor(provider).build().unwrap();
        let err = exec.run("x".to_string()).await.unwrap_err();
        assert!(err.to_string().contains("Tool not found: nao_existe"));
    }

    #[tokio::test]
    async fn max_iterations_guard() {
        let provider = ScriptedProvider::new(vec![
            call("c1", "upper", json!({ "ticker": "a" })),
            call("c2", "upper", json!({ "ticker": "b" })),
            call("c3", "upper", json!({ "ticker": "c" })),
        ]);
        let exec = executor(provider.clone()).max_iterations(2).build().unwrap();
        let err = exec.run("x".to_string()).await.unwrap_err();
        assert!(err.to_string().contains("Max iterations (2)"));
        assert_eq!(provider.requests().len(), 2);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = ScriptedProvider::new(vec![]);
        let exec = executor(provider).build().unwrap();
        let err = exec.run("x".to_string()).await.unwrap_err();
        assert!(matches!(err, Error::ProcessingFailed(m) if m.contains("script exhausted")));
    }

    #[tokio::test]
    async fn structured_turn_sends_schema_without_tools() {
        let provider = ScriptedProvider::new(vec![
            call("c1", "upper", json!({ "ticker": "wege3.sa" })),
            text("WEGE3.SA fechou em R$ 40.00"),
            text(r#"{"nome_empresa":"WEG"}"#),
        ]);
        let exec = executor(provider.clone()).build().unwrap();
        let schema = json!({ "type": "object" });

        let out = exec
            .run_structured("WEG".to_string(), schema.clone(), "Responda em JSON".to_string())
            .await
            .unwrap();
        assert_eq!(out, r#"{"nome_empresa":"WEG"}"#);

        let requests = provider.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].response_schema.is_none());
        let last = &requests[2];
        assert!(last.tools.is_none());
        assert_eq!(last.response_schema, Some(schema));
        assert_eq!(last.messages.len(), 3);
        assert_eq!(
            last.messages[1].text().as_deref(),
            Some("WEGE3.SA fechou em R$ 40.00")
        );
        assert_eq!(last.messages[2].text().as_deref(), Some("Responda em JSON"));
    }

    #[tokio::test]
    async fn empty_final_answer_is_error() {
        let provider = ScriptedProvider::new(vec![text("   ")]);
        let exec = executor(provider).build().unwrap();
        assert!(exec.run("x".to_string()).await.is_err());
    }
}
