use crate::agent::{ AgentInvoker, AgentRequest };
use crate::config::models::{ is_allowed_model, ui_models };
use crate::error::AgentError;
use crate::llm::ModelProvider;
use crate::models::chat::{ ChatRequest, ChatResponse, ErrorResponse };
use crate::ui::{ self, client::ChatApiClient };
use std::collections::BTreeMap;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
    response::{ IntoResponse, Response },
    http::StatusCode,
};
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, warn, error };

#[derive(Clone)]
pub struct AppState {
    pub invoker: Arc<dyn AgentInvoker>,
    pub chat_api: ChatApiClient,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/models", get(models_handler))
        .merge(ui::routes())
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, detail: String) -> Response {
    (status, Json(ErrorResponse { detail })).into_response()
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.to_string())
    }
}

/// Checks a chat request and reduces it to the agent call it stands for.
pub fn validate(request: ChatRequest) -> Result<AgentRequest, AgentError> {
    if !is_allowed_model(&request.model_name) {
        return Err(AgentError::InvalidModel(request.model_name));
    }
    let query = request.messages.last().cloned().ok_or(AgentError::EmptyMessages)?;

    Ok(AgentRequest {
        model_id: request.model_name,
        query,
        allow_search: request.allow_search,
        system_prompt: request.system_prompt,
        provider: request.model_provider,
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!("Rejected chat body: {}", rejection.body_text());
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    let agent_request = match validate(request) {
        Ok(r) => r,
        Err(e) => {
            warn!("Chat request rejected: {}", e);
            return e.into_response();
        }
    };

    info!(
        "Chat request: model={}, provider={}, search={}",
        agent_request.model_id,
        agent_request.provider,
        agent_request.allow_search
    );

    match state.invoker.invoke(agent_request).await {
        Ok(response) => (StatusCode::OK, Json(ChatResponse { response })).into_response(),
        Err(e) => {
            error!("Agent invocation failed: {}", e);
            e.into_response()
        }
    }
}

async fn models_handler() -> Json<BTreeMap<&'static str, &'static [&'static str]>> {
    Json(
        ModelProvider::ALL
            .iter()
            .map(|provider| (provider.as_str(), ui_models(*provider)))
            .collect()
    )
}
