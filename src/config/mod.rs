pub mod models;

use crate::cli::Args;
use crate::llm::{ LlmConfig, ModelProvider };

/// Credentials and endpoints for one upstream service.
#[derive(Debug, Clone, Default)]
pub struct ServiceEndpoint {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Runtime configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub groq: ServiceEndpoint,
    pub openai: ServiceEndpoint,
    pub tavily: ServiceEndpoint,
    pub max_agent_steps: usize,
    pub request_timeout_secs: Option<u64>,
    pub api_url: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            groq: ServiceEndpoint {
                api_key: non_empty(&args.groq_api_key),
                base_url: args.groq_base_url.as_deref().and_then(non_empty),
            },
            openai: ServiceEndpoint {
                api_key: non_empty(&args.openai_api_key),
                base_url: args.openai_base_url.as_deref().and_then(non_empty),
            },
            tavily: ServiceEndpoint {
                api_key: non_empty(&args.tavily_api_key),
                base_url: args.tavily_base_url.as_deref().and_then(non_empty),
            },
            max_agent_steps: args.max_agent_steps.max(1),
            request_timeout_secs: args.request_timeout_secs,
            api_url: args.api_url.clone(),
        }
    }

    pub fn provider_endpoint(&self, provider: ModelProvider) -> &ServiceEndpoint {
        match provider {
            ModelProvider::Groq => &self.groq,
            ModelProvider::OpenAI => &self.openai,
        }
    }

    pub fn llm_config(&self, provider: ModelProvider, model: &str) -> LlmConfig {
        let endpoint = self.provider_endpoint(provider);
        LlmConfig {
            provider,
            api_key: endpoint.api_key.clone(),
            model: model.to_string(),
            base_url: endpoint.base_url.clone(),
            timeout_secs: self.request_timeout_secs,
        }
    }
}
