//! Message types for LLM communication
//!
//! A conversation is a list of [`Message`]s. Each message is either plain
//! text or a list of [`ContentBlock`]s, which is how tool calls requested by
//! the model and the results sent back to it are carried.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant (model) message
    Assistant,
    /// System message (providers lift it into their own system slot)
    System,
}

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text {
        /// Text content
        text: String,
    },

    /// Tool use request from assistant
    ToolUse {
        /// Unique ID for this tool use
        id: String,
        /// Tool name
        name: String,
        /// Tool input parameters (JSON)
        input: serde_json::Value,
    },

    /// Tool result from user
    ToolResult {
        /// ID of the tool use this is responding to
        tool_use_id: String,
        /// Result content
        content: String,
        /// Whether this is an error result
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

impl ContentBlock {
    /// Successful tool result block
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: None,
        }
    }

    /// Failed tool result block
    pub fn tool_error(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: Some(true),
        }
    }
}

/// Message content: either simple text or structured blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Structured content blocks
    Blocks(Vec<ContentBlock>),
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Message content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create a system message with text
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message from blocks
    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(blocks)),
        }
    }

    /// Create a user message with a single tool result
    pub fn tool_result(tool_use_id: String, result: String) -> Self {
        Self::tool_results(vec![ContentBlock::tool_result(tool_use_id, result)])
    }

    /// Create a user message with a single error tool result
    pub fn tool_error(tool_use_id: String, error: String) -> Self {
        Self::tool_results(vec![ContentBlock::tool_error(tool_use_id, error)])
    }

    /// Create a user message carrying several tool results, in call order
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Blocks(results)),
        }
    }

    /// Extract text content from the message
    ///
    /// For block content the text blocks are concatenated, so a reply split
    /// across several parts comes back whole.
    pub fn text(&self) -> Option<String> {
        match &self.content {
            Some(MessageContent::Text(s)) => Some(s.clone()),
            Some(MessageContent::Blocks(blocks)) => {
                let texts: Vec<&str> = blocks
                    .iter()
                    .filter_map(|b| match b {
                        ContentBlock::Text { text } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect();
                if texts.is_empty() {
                    None
                } else {
                    Some(texts.concat())
                }
            }
            None => None,
        }
    }

    /// Extract tool use requests from assistant messages
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks
                .iter()
                .filter(|b| matches!(b, ContentBlock::ToolUse { .. }))
                .collect(),
            _ => vec![],
        }
    }

    /// Check if this message contains any tool uses
    pub fn has_tool_uses(&self) -> bool {
        !self.tool_uses().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message() {
        let msg = Message::user("magalu");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text().as_deref(), Some("magalu"));
    }

    #[test]
    fn test_text_joins_blocks() {
        let msg = Message::assistant_blocks(vec![
            ContentBlock::Text {
                text: "## 📊 ".to_string(),
            },
            ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: "resumo_empresa".to_string(),
                input: json!({"empresa": "Petrobras"}),
            },
            ContentBlock::Text {
                text: "Relatório".to_string(),
            },
        ]);
        assert_eq!(msg.text().as_deref(), Some("## 📊 Relatório"));
        assert!(msg.has_tool_uses());
    }

    #[test]
    fn test_tool_use_only_has_no_text() {
        let msg = Message::assistant_blocks(vec![ContentBlock::ToolUse {
            id: "call_1".to_string(),
            name: "buscar_ticker_empresa".to_string(),
            input: json!({"empresa": "WEG"}),
        }]);
        assert_eq!(msg.text(), None);
        assert_eq!(msg.tool_uses().len(), 1);
    }

    #[test]
    fn test_tool_results_keep_order() {
        let msg = Message::tool_results(vec![
            ContentBlock::tool_result("a", "first"),
            ContentBlock::tool_error("b", "second"),
        ]);
        assert_eq!(msg.role, Role::User);
        assert!(!msg.has_tool_uses());
        match msg.content {
            Some(MessageContent::Blocks(blocks)) => {
                assert_eq!(blocks[0], ContentBlock::tool_result("a", "first"));
                assert!(matches!(
                    &blocks[1],
                    ContentBlock::ToolResult { is_error: Some(true), .. }
                ));
            }
            _ => panic!("Expected blocks"),
        }
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::tool_result("call_9".to_string(), "PETR4.SA".to_string());
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, msg);
    }
}
