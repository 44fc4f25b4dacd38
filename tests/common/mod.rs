#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{ to_bytes, Body };
use axum::http::{ Request, Response, StatusCode };
use search_agent::agent::{ AgentInvoker, AgentRequest };
use search_agent::config::{ AppConfig, ServiceEndpoint };
use search_agent::error::AgentError;
use search_agent::llm::LlmError;
use search_agent::server::api::{ router, AppState };
use search_agent::ui::client::ChatApiClient;
use serde_json::Value as JsonValue;
use std::sync::{ Arc, Mutex };
use tower::ServiceExt;

/// Invoker double that records what it was asked and replies from a script.
pub struct RecordingInvoker {
    pub calls: Mutex<Vec<AgentRequest>>,
    reply: Result<String, String>,
}

impl RecordingInvoker {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), reply: Ok(text.to_string()) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), reply: Err(message.to_string()) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AgentInvoker for RecordingInvoker {
    async fn invoke(&self, request: AgentRequest) -> Result<String, AgentError> {
        self.calls.lock().unwrap().push(request);
        self.reply
            .clone()
            .map_err(|msg| LlmError::InvalidResponse(msg).into())
    }
}

pub fn config(groq: Option<(&str, String)>, openai: Option<(&str, String)>, tavily: Option<(&str, String)>) -> AppConfig {
    let endpoint = |entry: Option<(&str, String)>| match entry {
        Some((key, url)) => ServiceEndpoint { api_key: Some(key.to_string()), base_url: Some(url) },
        None => ServiceEndpoint::default(),
    };
    AppConfig {
        groq: endpoint(groq),
        openai: endpoint(openai),
        tavily: endpoint(tavily),
        max_agent_steps: 5,
        request_timeout_secs: Some(5),
        api_url: "http://127.0.0.1:9/chat".to_string(),
    }
}

pub fn state_with(invoker: Arc<dyn AgentInvoker>, api_url: &str) -> AppState {
    AppState {
        invoker,
        chat_api: ChatApiClient::new(api_url.to_string(), Some(5)).unwrap(),
    }
}

pub async fn send(state: AppState, request: Request<Body>) -> (StatusCode, String) {
    let response: Response<Body> = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn post_json(uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}
