use axum::http::StatusCode;
use thiserror::Error;

use crate::llm::LlmError;
use crate::tools::ToolError;

pub const INVALID_MODEL_DETAIL: &str = "Invalid model name. Kindly select a valid AI model.";
pub const EMPTY_MESSAGES_DETAIL: &str = "Messages list cannot be empty.";

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("{}", INVALID_MODEL_DETAIL)]
    InvalidModel(String),
    #[error("{}", EMPTY_MESSAGES_DETAIL)]
    EmptyMessages,
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Provider(LlmError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("Agent stopped after {0} steps without a final answer")]
    StepLimit(usize),
}

impl AgentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AgentError::InvalidModel(_) | AgentError::EmptyMessages => StatusCode::BAD_REQUEST,
            AgentError::Config(_)
            | AgentError::Provider(_)
            | AgentError::Tool(_)
            | AgentError::StepLimit(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LlmError> for AgentError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Config(msg) => AgentError::Config(msg),
            other => AgentError::Provider(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ModelProvider;

    #[test]
    fn validation_errors_are_client_errors() {
        let invalid = AgentError::InvalidModel("x".into());
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), INVALID_MODEL_DETAIL);
        assert_eq!(AgentError::EmptyMessages.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn downstream_errors_are_server_errors_with_their_text() {
        let err: AgentError = LlmError::Api {
            provider: ModelProvider::OpenAI,
            status: 429,
            body: "rate limited".into(),
        }.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "OpenAI API error 429: rate limited");
    }

    #[test]
    fn llm_config_errors_become_config_kind() {
        let err: AgentError = LlmError::Config("Groq API key is required".into()).into();
        assert!(matches!(err, AgentError::Config(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
