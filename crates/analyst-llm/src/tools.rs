//! Tool definition types for LLM tool use

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition for LLM provider
///
/// This describes a tool that the LLM can use, including its name,
/// description, and input schema. Schemas are kept to the subset Gemini
/// function declarations accept (`type`, `description`, `properties`,
/// `required`, `items`, `nullable`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool in ToolRegistry)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Helper module to build JSON schemas for tools and structured replies
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use analyst_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "empresa": schema::string("Nome da empresa"),
    ///     }),
    ///     vec!["empresa"],
    /// );
    /// assert_eq!(schema["required"][0], "empresa");
    /// ```
    pub fn object(properties: Value, required: Vec<&str>) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// Number property schema
    pub fn number(description: &str) -> Value {
        json!({
            "type": "number",
            "description": description,
        })
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": items,
        })
    }

    /// Mark a property schema as accepting `null`
    ///
    /// ```
    /// use analyst_llm::tools::schema;
    ///
    /// let price = schema::nullable(schema::number("Último fechamento"));
    /// assert_eq!(price["nullable"], true);
    /// ```
    pub fn nullable(mut property: Value) -> Value {
        if let Some(map) = property.as_object_mut() {
            map.insert("nullable".to_string(), Value::Bool(true));
        }
        property
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_creation() {
        let schema = schema::object(
            json!({
                "ticker": schema::string("Ticker da ação"),
            }),
            vec!["ticker"],
        );

        let tool = ToolDefinition::new(
            "preco_acao_empresa",
            "Último preço de fechamento",
            schema.clone(),
        );
        assert_eq!(tool.name, "preco_acao_empresa");
        assert_eq!(tool.input_schema, schema);
    }

    #[test]
    fn test_schema_builders() {
        assert_eq!(schema::string("t")["type"], "string");
        assert_eq!(schema::number("n")["type"], "number");

        let list = schema::array("itens", schema::string("item"));
        assert_eq!(list["items"]["type"], "string");
    }

    #[test]
    fn test_nullable_keeps_type() {
        let prop = schema::nullable(schema::array("notícias", schema::string("x")));
        assert_eq!(prop["type"], "array");
        assert_eq!(prop["nullable"], true);
    }
}
