pub mod tavily;

use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use serde_json::Value as JsonValue;
use thiserror::Error;

pub use self::tavily::TavilySearchTool;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
}

/// The schema advertised to the model for one callable tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: JsonValue,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn definition(&self) -> ToolDefinition;

    /// Runs the tool with the model-supplied JSON arguments.
    async fn execute(&self, arguments: &JsonValue) -> Result<JsonValue, ToolError>;
}
