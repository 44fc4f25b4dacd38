pub mod completions;
pub mod groq;
pub mod openai;

use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use std::sync::Arc;
use super::{ LlmConfig, LlmError, ModelProvider };
use self::groq::GroqChatClient;
use self::openai::OpenAIChatClient;
use crate::tools::ToolDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A function call requested by the model in an assistant turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, content)
    }

    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::plain(Role::Assistant, content)
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::plain(Role::Tool, content)
        }
    }
}

/// A chat model that can answer a transcript, optionally requesting tool calls.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition]
    ) -> Result<ChatMessage, LlmError>;

    fn provider(&self) -> ModelProvider;
    fn model(&self) -> &str;
}

type ClientConstructor = fn(&LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError>;

fn build_groq(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    Ok(Arc::new(GroqChatClient::from_config(config)?))
}

fn build_openai(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    Ok(Arc::new(OpenAIChatClient::from_config(config)?))
}

// Keep exhaustive: every provider variant needs a constructor.
fn constructor_for(provider: ModelProvider) -> ClientConstructor {
    match provider {
        ModelProvider::Groq => build_groq,
        ModelProvider::OpenAI => build_openai,
    }
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let construct = constructor_for(config.provider);
    construct(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: ModelProvider, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider,
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            base_url: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn builds_client_for_each_provider() {
        for provider in ModelProvider::ALL {
            let client = new_client(&config(provider, Some("key"))).unwrap();
            assert_eq!(client.provider(), provider);
            assert_eq!(client.model(), "test-model");
        }
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = new_client(&config(ModelProvider::Groq, None)).err().unwrap();
        assert!(matches!(err, LlmError::Config(_)));
        assert_eq!(err.to_string(), "Groq API key is required");
    }

    #[test]
    fn tool_result_carries_call_id() {
        let msg = ChatMessage::tool_result("call_1", "[]");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert!(msg.tool_calls.is_empty());
    }
}
