//! OpenAI-compatible `/chat/completions` transport shared by the Groq and OpenAI clients.

use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use serde_json::Value as JsonValue;
use std::time::Duration;

use super::{ ChatMessage, Role, ToolCall };
use crate::llm::{ LlmError, ModelProvider };
use crate::tools::ToolDefinition;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct WireMessage {
    role: Role,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Serialize, Debug)]
struct WireFunctionDef<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a JsonValue,
}

#[derive(Serialize, Debug)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionDef<'a>,
}

#[derive(Serialize, Debug)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
    message: WireMessage,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        let tool_calls = if msg.tool_calls.is_empty() {
            None
        } else {
            Some(
                msg.tool_calls
                    .iter()
                    .map(|call| WireToolCall {
                        id: call.id.clone(),
                        kind: function_kind(),
                        function: WireFunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.clone(),
                        },
                    })
                    .collect()
            )
        };
        // Assistant turns that only call tools are sent with a null content.
        let content = if tool_calls.is_some() && msg.content.is_empty() {
            None
        } else {
            Some(msg.content.clone())
        };
        WireMessage {
            role: msg.role,
            content,
            tool_calls,
            tool_call_id: msg.tool_call_id.clone(),
        }
    }
}

impl From<WireMessage> for ChatMessage {
    fn from(msg: WireMessage) -> Self {
        let tool_calls = msg.tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();
        ChatMessage {
            role: msg.role,
            content: msg.content.unwrap_or_default(),
            tool_calls,
            tool_call_id: msg.tool_call_id,
        }
    }
}

pub struct CompletionsEndpoint {
    http: HttpClient,
    url: String,
    provider: ModelProvider,
}

impl CompletionsEndpoint {
    pub fn new(
        provider: ModelProvider,
        api_key: &str,
        base_url: &str,
        timeout_secs: Option<u64>
    ) -> Result<Self, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
                LlmError::Config(format!("Invalid API key format: {}", e))
            )?
        );

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| LlmError::Http { provider, source: e })?;

        Ok(Self {
            http,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            provider,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: &[ToolDefinition]
    ) -> Result<ChatMessage, LlmError> {
        let provider = self.provider;
        let req = CompletionRequest {
            model,
            messages: messages.iter().map(WireMessage::from).collect(),
            tools: tools
                .iter()
                .map(|tool| WireTool {
                    kind: "function",
                    function: WireFunctionDef {
                        name: &tool.name,
                        description: &tool.description,
                        parameters: &tool.parameters,
                    },
                })
                .collect(),
        };

        debug!("{} completion request to {} ({} messages)", provider, self.url, messages.len());

        let resp = self.http
            .post(&self.url)
            .json(&req)
            .send().await
            .map_err(|e| LlmError::Http { provider, source: e })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api { provider, status: status.as_u16(), body });
        }

        let parsed = resp
            .json::<CompletionResponse>().await
            .map_err(|e| LlmError::Http { provider, source: e })?;

        let choice = parsed.choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse(format!("No response from {} API", provider)))?;

        Ok(choice.message.into())
    }
}
