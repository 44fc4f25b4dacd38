pub mod chat;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ModelProvider {
    Groq,
    OpenAI,
}

impl ModelProvider {
    pub const ALL: [ModelProvider; 2] = [ModelProvider::Groq, ModelProvider::OpenAI];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::Groq => "Groq",
            ModelProvider::OpenAI => "OpenAI",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseProviderError {
    message: String,
}

impl fmt::Display for ParseProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseProviderError {}

// Tags are matched exactly; the wire format carries "Groq" / "OpenAI".
impl FromStr for ModelProvider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Groq" => Ok(ModelProvider::Groq),
            "OpenAI" => Ok(ModelProvider::OpenAI),
            _ =>
                Err(ParseProviderError {
                    message: format!("Unsupported provider: {}", s),
                }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ModelProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("{0}")]
    Config(String),
    #[error("{provider} request failed: {source}")]
    Http {
        provider: ModelProvider,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} API error {status}: {body}")]
    Api {
        provider: ModelProvider,
        status: u16,
        body: String,
    },
    #[error("{0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_provider_tags() {
        assert_eq!("Groq".parse::<ModelProvider>(), Ok(ModelProvider::Groq));
        assert_eq!("OpenAI".parse::<ModelProvider>(), Ok(ModelProvider::OpenAI));
    }

    #[test]
    fn rejects_unknown_provider_tag() {
        let err = "Anthropic".parse::<ModelProvider>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported provider: Anthropic");
        assert!("openai".parse::<ModelProvider>().is_err());
    }

    #[test]
    fn serializes_as_wire_tag() {
        let json = serde_json::to_string(&ModelProvider::OpenAI).unwrap();
        assert_eq!(json, "\"OpenAI\"");
        for provider in ModelProvider::ALL {
            assert_eq!(provider.to_string().parse::<ModelProvider>(), Ok(provider));
        }
    }
}
