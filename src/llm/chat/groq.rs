use async_trait::async_trait;
use log::info;

use super::completions::CompletionsEndpoint;
use super::{ ChatClient, ChatMessage };
use crate::llm::{ LlmConfig, LlmError, ModelProvider };
use crate::tools::ToolDefinition;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct GroqChatClient {
    endpoint: CompletionsEndpoint,
    model: String,
}

impl GroqChatClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, LlmError> {
        let api_url = base_url.unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string());
        let endpoint = CompletionsEndpoint::new(ModelProvider::Groq, &api_key, &api_url, timeout_secs)?;

        Ok(Self { endpoint, model })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key
            .clone()
            .ok_or_else(|| LlmError::Config("Groq API key is required".to_string()))?;

        Self::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            config.timeout_secs,
        )
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition]
    ) -> Result<ChatMessage, LlmError> {
        info!("Groq chat request: model={}, tools={}", self.model, tools.len());
        self.endpoint.complete(&self.model, messages, tools).await
    }

    fn provider(&self) -> ModelProvider {
        ModelProvider::Groq
    }

    fn model(&self) -> &str {
        &self.model
    }
}
