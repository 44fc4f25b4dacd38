use async_trait::async_trait;
use log::{ debug, info, warn };
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AgentError;
use crate::llm::chat::{ new_client, ChatClient, ChatMessage, Role, ToolCall };
use crate::llm::ModelProvider;
use crate::tools::{ Tool, ToolDefinition, TavilySearchTool };

pub const NO_RESPONSE_FALLBACK: &str = "No AI response found.";
pub const SEARCH_MAX_RESULTS: usize = 2;

/// One chat turn routed to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRequest {
    pub model_id: String,
    pub query: String,
    pub allow_search: bool,
    pub system_prompt: String,
    pub provider: String,
}

#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(&self, request: AgentRequest) -> Result<String, AgentError>;
}

/// A reason-act loop: the model either answers or asks for tool calls,
/// whose results are fed back until it answers.
pub struct ReactAgent {
    model: Arc<dyn ChatClient>,
    tools: Vec<Arc<dyn Tool>>,
    max_steps: usize,
}

impl ReactAgent {
    pub fn new(model: Arc<dyn ChatClient>, tools: Vec<Arc<dyn Tool>>, max_steps: usize) -> Self {
        Self { model, tools, max_steps: max_steps.max(1) }
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn model(&self) -> &Arc<dyn ChatClient> {
        &self.model
    }

    /// Runs to completion and returns the full transcript, seed included.
    pub async fn run(&self, seed: Vec<ChatMessage>) -> Result<Vec<ChatMessage>, AgentError> {
        let definitions: Vec<ToolDefinition> = self.tools
            .iter()
            .map(|tool| tool.definition())
            .collect();
        let mut transcript = seed;

        for step in 1..=self.max_steps {
            let reply = self.model.chat(&transcript, &definitions).await?;
            let calls = reply.tool_calls.clone();
            transcript.push(reply);

            if calls.is_empty() {
                info!("Agent finished after {} step(s)", step);
                return Ok(transcript);
            }

            debug!("Step {}: model requested {} tool call(s)", step, calls.len());
            for call in &calls {
                let output = self.call_tool(call).await;
                transcript.push(ChatMessage::tool_result(call.id.clone(), output));
            }
        }

        warn!("Agent hit the step limit of {}", self.max_steps);
        Err(AgentError::StepLimit(self.max_steps))
    }

    // Tool failures are reported back to the model instead of aborting the run.
    async fn call_tool(&self, call: &ToolCall) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            let names: Vec<&str> = self.tools.iter().map(|t| t.name()).collect();
            warn!("Model requested unknown tool '{}'", call.name);
            return format!(
                "Error: {} is not a valid tool, try one of [{}].",
                call.name,
                names.join(", ")
            );
        };

        let arguments = if call.arguments.trim().is_empty() {
            Ok(JsonValue::Object(Default::default()))
        } else {
            serde_json::from_str::<JsonValue>(&call.arguments)
        };
        let arguments = match arguments {
            Ok(v) => v,
            Err(e) => {
                warn!("Unparseable arguments for tool '{}': {}", call.name, e);
                return format!("Error: invalid JSON arguments: {}\n Please fix your mistakes.", e);
            }
        };

        info!("Calling tool '{}'", call.name);
        match tool.execute(&arguments).await {
            Ok(JsonValue::String(s)) => s,
            Ok(value) => value.to_string(),
            Err(e) => {
                warn!("Tool '{}' failed: {}", call.name, e);
                format!("Error: {}\n Please fix your mistakes.", e)
            }
        }
    }
}

/// Content of the last assistant message, or the fixed fallback when there is none.
pub fn final_response(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
        .map(|m| m.content.clone())
        .unwrap_or_else(|| NO_RESPONSE_FALLBACK.to_string())
}

pub struct ProviderAgentInvoker {
    config: Arc<AppConfig>,
}

impl ProviderAgentInvoker {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn search_tools(&self, allow_search: bool) -> Result<Vec<TavilySearchTool>, AgentError> {
        if !allow_search {
            return Ok(Vec::new());
        }
        let api_key = self.config.tavily.api_key
            .clone()
            .ok_or_else(|| AgentError::Config("Tavily API key is required".to_string()))?;
        let tool = TavilySearchTool::new(
            api_key,
            self.config.tavily.base_url.clone(),
            SEARCH_MAX_RESULTS,
            self.config.request_timeout_secs
        )?;
        Ok(vec![tool])
    }

    pub fn build_agent(
        &self,
        provider: ModelProvider,
        model_id: &str,
        allow_search: bool
    ) -> Result<ReactAgent, AgentError> {
        let model = new_client(&self.config.llm_config(provider, model_id))?;
        let tools = self
            .search_tools(allow_search)?
            .into_iter()
            .map(|tool| Arc::new(tool) as Arc<dyn Tool>)
            .collect();
        Ok(ReactAgent::new(model, tools, self.config.max_agent_steps))
    }
}

#[async_trait]
impl AgentInvoker for ProviderAgentInvoker {
    async fn invoke(&self, request: AgentRequest) -> Result<String, AgentError> {
        let provider: ModelProvider = request.provider
            .parse()
            .map_err(|e: crate::llm::ParseProviderError| AgentError::Config(e.to_string()))?;

        info!(
            "Invoking agent: provider={}, model={}, search={}",
            provider,
            request.model_id,
            request.allow_search
        );

        let agent = self.build_agent(provider, &request.model_id, request.allow_search)?;
        let seed = vec![ChatMessage::system(request.system_prompt), ChatMessage::user(request.query)];
        let transcript = agent.run(seed).await?;

        Ok(final_response(&transcript))
    }
}
