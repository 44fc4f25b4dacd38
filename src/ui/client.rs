use log::{ info, warn };
use reqwest::{ Client as HttpClient, StatusCode };
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::models::chat::ChatRequest;

pub const NO_RESPONSE_RECEIVED: &str = "No response received.";

/// What the UI shows after calling the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Answer(String),
    ApiError(String),
    RequestFailed(String),
}

/// HTTP client the web UI uses to reach `POST /chat`.
#[derive(Clone)]
pub struct ChatApiClient {
    http: HttpClient,
    api_url: String,
}

impl ChatApiClient {
    pub fn new(api_url: String, timeout_secs: Option<u64>) -> Result<Self, reqwest::Error> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self { http: builder.build()?, api_url })
    }

    pub async fn ask(&self, payload: &ChatRequest) -> AskOutcome {
        info!("UI posting to {} (model={})", self.api_url, payload.model_name);
        let resp = match self.http.post(&self.api_url).json(payload).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("UI request to {} failed: {}", self.api_url, e);
                return AskOutcome::RequestFailed(format!("Request failed: {}", e));
            }
        };

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return AskOutcome::ApiError(format!("API Error {}: {}", status.as_u16(), body));
        }

        let body = match resp.json::<JsonValue>().await {
            Ok(b) => b,
            Err(e) => {
                return AskOutcome::RequestFailed(format!("Request failed: {}", e));
            }
        };

        if let Some(err) = body.get("error") {
            let message = match err {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            return AskOutcome::ApiError(message);
        }

        let text = body
            .get("response")
            .and_then(JsonValue::as_str)
            .unwrap_or(NO_RESPONSE_RECEIVED)
            .to_string();
        AskOutcome::Answer(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{ body_json, method, path };
    use wiremock::{ Mock, MockServer, ResponseTemplate };

    fn payload() -> ChatRequest {
        ChatRequest {
            model_name: "gpt-4o-mini".into(),
            model_provider: "OpenAI".into(),
            system_prompt: "You are a helpful assistant.".into(),
            messages: vec!["Hello".into()],
            allow_search: false,
        }
    }

    async fn client_for(server: &MockServer) -> ChatApiClient {
        ChatApiClient::new(format!("{}/chat", server.uri()), None).unwrap()
    }

    #[tokio::test]
    async fn returns_response_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(serde_json::to_value(payload()).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi **there**" })))
            .mount(&server).await;

        let outcome = client_for(&server).await.ask(&payload()).await;
        assert_eq!(outcome, AskOutcome::Answer("Hi **there**".into()));
    }

    #[tokio::test]
    async fn missing_response_key_uses_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server).await;

        let outcome = client_for(&server).await.ask(&payload()).await;
        assert_eq!(outcome, AskOutcome::Answer(NO_RESPONSE_RECEIVED.into()));
    }

    #[tokio::test]
    async fn error_key_in_ok_body_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "quota exceeded" })))
            .mount(&server).await;

        let outcome = client_for(&server).await.ask(&payload()).await;
        assert_eq!(outcome, AskOutcome::ApiError("quota exceeded".into()));
    }

    #[tokio::test]
    async fn non_ok_status_reports_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("{\"detail\":\"Messages list cannot be empty.\"}"))
            .mount(&server).await;

        let outcome = client_for(&server).await.ask(&payload()).await;
        assert_eq!(
            outcome,
            AskOutcome::ApiError("API Error 400: {\"detail\":\"Messages list cannot be empty.\"}".into())
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_a_request_failure() {
        let server = MockServer::start().await;
        let url = format!("{}/chat", server.uri());
        drop(server);

        let outcome = ChatApiClient::new(url, Some(2)).unwrap().ask(&payload()).await;
        match outcome {
            AskOutcome::RequestFailed(msg) => assert!(msg.starts_with("Request failed: ")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
