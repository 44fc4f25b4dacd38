use async_trait::async_trait;
use log::{ debug, info };
use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use serde_json::{ json, Value as JsonValue };
use std::time::Duration;

use super::{ Tool, ToolDefinition, ToolError };

pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
pub const TAVILY_TOOL_NAME: &str = "tavily_search_results_json";

pub struct TavilySearchTool {
    http: HttpClient,
    api_key: String,
    url: String,
    max_results: usize,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TavilyResult {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

impl TavilySearchTool {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        max_results: usize,
        timeout_secs: Option<u64>
    ) -> Result<Self, ToolError> {
        let api_url = base_url.unwrap_or_else(|| DEFAULT_TAVILY_BASE_URL.to_string());
        let mut builder = HttpClient::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ToolError::ExecutionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            url: format!("{}/search", api_url.trim_end_matches('/')),
            max_results,
        })
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub async fn search(&self, query: &str) -> Result<Vec<TavilyResult>, ToolError> {
        info!("Tavily search: query='{}', max_results={}", query, self.max_results);
        let req = TavilyRequest {
            api_key: &self.api_key,
            query,
            max_results: self.max_results,
        };

        let resp = self.http
            .post(&self.url)
            .json(&req)
            .send().await
            .map_err(|e| ToolError::ExecutionError(format!("Tavily request error: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ToolError::ExecutionError(format!("Tavily API error {}: {}", status.as_u16(), body)));
        }

        let parsed = resp
            .json::<TavilyResponse>().await
            .map_err(|e| ToolError::ExecutionError(format!("Failed to parse Tavily response: {}", e)))?;

        let mut results = parsed.results;
        results.truncate(self.max_results);
        debug!("Tavily returned {} results", results.len());
        Ok(results)
    }
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        TAVILY_TOOL_NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: TAVILY_TOOL_NAME.to_string(),
            description: "A search engine optimized for comprehensive, accurate, and trusted results. \
                Useful for when you need to answer questions about current events. \
                Input should be a search query."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "search query to look up"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, arguments: &JsonValue) -> Result<JsonValue, ToolError> {
        let query = arguments
            .get("query")
            .and_then(JsonValue::as_str)
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ToolError::InvalidArguments("missing 'query' string".to_string()))?;

        let results = self.search(query).await?;
        serde_json::to_value(results).map_err(|e| ToolError::ExecutionError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{ body_partial_json, method, path };
    use wiremock::{ Mock, MockServer, ResponseTemplate };

    fn tool(server: &MockServer) -> TavilySearchTool {
        TavilySearchTool::new("tvly-test".into(), Some(server.uri()), 2, None).unwrap()
    }

    #[tokio::test]
    async fn sends_query_and_result_cap() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(json!({ "api_key": "tvly-test", "query": "rust 2024", "max_results": 2 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "results": [
                        { "title": "a", "url": "https://a.example", "content": "first" },
                        { "title": "b", "url": "https://b.example", "content": "second" },
                        { "title": "c", "url": "https://c.example", "content": "third" }
                    ]
                }))
            )
            .expect(1)
            .mount(&server).await;

        let out = tool(&server).execute(&json!({ "query": "rust 2024" })).await.unwrap();
        let items = out.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["url"], "https://a.example");
    }

    #[tokio::test]
    async fn http_failure_is_an_execution_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server).await;

        let err = tool(&server).execute(&json!({ "query": "x" })).await.unwrap_err();
        assert_eq!(err.to_string(), "Tool execution failed: Tavily API error 401: bad key");
    }

    #[tokio::test]
    async fn missing_query_is_rejected_without_a_request() {
        let server = MockServer::start().await;
        let err = tool(&server).execute(&json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
