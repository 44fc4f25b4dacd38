pub mod agent;
pub mod models;
pub mod server;
pub mod config;
pub mod llm;
pub mod cli;
pub mod error;
pub mod tools;
pub mod ui;

use agent::ProviderAgentInvoker;
use cli::Args;
use config::AppConfig;
use log::info;
use server::api::AppState;
use server::Server;
use std::error::Error;
use std::sync::Arc;
use ui::client::ChatApiClient;

fn describe_secret(value: &Option<String>) -> &'static str {
    if value.is_some() { "set" } else { "not set" }
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Arc::new(AppConfig::from_args(&args));

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("UI Chat API URL: {}", config.api_url);
    info!("Groq API Key: {}", describe_secret(&config.groq.api_key));
    info!("Groq Base URL: {}", config.groq.base_url.as_deref().unwrap_or("adapter default"));
    info!("OpenAI API Key: {}", describe_secret(&config.openai.api_key));
    info!("OpenAI Base URL: {}", config.openai.base_url.as_deref().unwrap_or("adapter default"));
    info!("Tavily API Key: {}", describe_secret(&config.tavily.api_key));
    info!("Tavily Base URL: {}", config.tavily.base_url.as_deref().unwrap_or("adapter default"));
    info!("Max Agent Steps: {}", config.max_agent_steps);
    info!("Request Timeout: {:?}", config.request_timeout_secs);
    info!("-------------------------");

    let state = AppState {
        invoker: Arc::new(ProviderAgentInvoker::new(config.clone())),
        chat_api: ChatApiClient::new(config.api_url.clone(), config.request_timeout_secs)?,
    };

    let server = Server::new(args.server_addr.clone(), state);
    server.run().await?;

    Ok(())
}
