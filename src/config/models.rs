use crate::llm::ModelProvider;

/// Model identifiers the chat endpoint accepts.
pub const ALLOWED_MODEL_NAMES: [&str; 5] = [
    "llama3-70b-8192",
    "deepseek-r1-distill-llama-70b",
    "llama-3.3-70b-versatile",
    "mistral-saba-24b",
    "gpt-4o-mini",
];

const GROQ_UI_MODELS: &[&str] = &[
    "deepseek-r1-distill-llama-70b",
    "llama-3.3-70b-versatile",
    "mistral-saba-24b",
];

const OPENAI_UI_MODELS: &[&str] = &["gpt-4o-mini"];

pub fn is_allowed_model(name: &str) -> bool {
    ALLOWED_MODEL_NAMES.contains(&name)
}

/// Models offered in the UI picker for a provider.
pub fn ui_models(provider: ModelProvider) -> &'static [&'static str] {
    match provider {
        ModelProvider::Groq => GROQ_UI_MODELS,
        ModelProvider::OpenAI => OPENAI_UI_MODELS,
    }
}
