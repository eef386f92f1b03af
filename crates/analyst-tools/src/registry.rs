//! Tool registry for managing available tools

use crate::Tool;
use analyst_llm::ToolDefinition;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Registry for managing tools
///
/// Tools keep their registration order, which is the order their
/// definitions are offered to the model.
pub struct ToolRegistry {
    tools: RwLock<Vec<Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(Vec::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from tools, in order
    pub fn from_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool
    ///
    /// A tool with an already registered name replaces the old one in place.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = tools.iter_mut().find(|t| t.name() == tool.name()) {
            debug!(tool = %tool.name(), "Replacing registered tool");
            *slot = tool;
        } else {
            debug!(tool = %tool.name(), position = tools.len(), "Registered tool");
            tools.push(tool);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Names of the registered tools in registration order
    pub fn names(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Definitions to send to the LLM, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.iter().map(|t| t.definition()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst_core::Result;
    use analyst_llm::tools::schema;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    struct Fixed {
        name: &'static str,
        reply: &'static str,
    }

    #[async_trait]
    impl Tool for Fixed {
        async fn execute(&self, _params: Value) -> Result<Value> {
            Ok(Value::String(self.reply.to_string()))
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "fixed reply"
        }

        fn input_schema(&self) -> Value {
            schema::object(json!({ "empresa": schema::string("empresa") }), vec!["empresa"])
        }
    }

    fn fixed(name: &'static str, reply: &'static str) -> Arc<dyn Tool> {
        Arc::new(Fixed { name, reply })
    }

    #[test]
    fn keeps_registration_order() {
        let registry = ToolRegistry::from_tools([
            fixed("zeta", "z"),
            fixed("alpha", "a"),
            fixed("mu", "m"),
        ]);
        assert_eq!(registry.names(), vec!["zeta", "alpha", "mu"]);

        let defs = registry.definitions();
        assert_eq!(defs[1].name, "alpha");
        assert_eq!(defs[1].input_schema["required"][0], "empresa");
    }

    #[test]
    fn duplicate_name_replaces_in_place() {
        let registry = ToolRegistry::new();
        registry.register(fixed("a", "first"));
        registry.register(fixed("b", "b"));
        registry.register(fixed("a", "second"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["a", "b"]);

        let replaced = registry.get("a").unwrap();
        let reply = tokio_test::block_on(replaced.execute(json!({}))).unwrap();
        assert_eq!(reply, json!("second"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn registration_is_logged() {
        let logs = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let registry = ToolRegistry::new();
            registry.register(fixed("resumo_empresa", "first"));
            registry.register(fixed("resumo_empresa", "second"));
        });

        let text = logs.text();
        assert!(text.contains("Registered tool"), "{text}");
        assert!(text.contains("Replacing registered tool"), "{text}");
        assert!(text.contains("tool=resumo_empresa"), "{text}");
    }

    #[tokio::test]
    async fn lookup_by_name() {
        let registry = ToolRegistry::from_tools([fixed("a", "first"), fixed("b", "second")]);
        let tool = registry.get("b").unwrap();
        assert_eq!(tool.execute(json!({})).await.unwrap(), json!("second"));
        assert!(registry.get("c").is_none());
        assert!(!registry.is_empty());
    }
}
