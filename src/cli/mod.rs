use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Provider Credentials ---
    /// API Key for Groq chat completions
    #[arg(long, env = "GROQ_API_KEY", default_value = "", hide_env_values = true)]
    pub groq_api_key: String,

    /// API Key for OpenAI chat completions
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub openai_api_key: String,

    /// API Key for the Tavily web search tool
    #[arg(long, env = "TAVILY_API_KEY", default_value = "", hide_env_values = true)]
    pub tavily_api_key: String,

    // --- Provider Endpoints ---
    /// Base URL for the Groq OpenAI-compatible API (e.g., https://api.groq.com/openai/v1)
    #[arg(long, env = "GROQ_BASE_URL")] // No default, let adapters handle defaults if None
    pub groq_base_url: Option<String>,

    /// Base URL for the OpenAI API (e.g., https://api.openai.com/v1)
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    /// Base URL for the Tavily search API (e.g., https://api.tavily.com)
    #[arg(long, env = "TAVILY_BASE_URL")]
    pub tavily_base_url: Option<String>,

    // --- Agent Args ---
    /// Maximum number of model calls in a single agent run before it is aborted.
    #[arg(long, env = "MAX_AGENT_STEPS", default_value = "25")]
    pub max_agent_steps: usize,

    /// Timeout in seconds for outbound provider and search calls. Unset means no timeout.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    // --- General App Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:9999")]
    pub server_addr: String,

    /// Chat endpoint the web UI posts to.
    #[arg(long, env = "CHAT_API_URL", default_value = "http://127.0.0.1:9999/chat")]
    pub api_url: String,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // Reads declared defaults from the command definition so exported env vars cannot leak in.
    fn declared(id: &str) -> (Option<String>, Option<String>) {
        let command = Args::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .unwrap_or_else(|| panic!("no argument {}", id));
        let default = arg.get_default_values().first().map(|v| v.to_string_lossy().into_owned());
        let env = arg.get_env().map(|v| v.to_string_lossy().into_owned());
        (default, env)
    }

    #[test]
    fn ui_targets_the_server_port_by_default() {
        assert_eq!(declared("server_addr"), (Some("127.0.0.1:9999".into()), Some("SERVER_ADDR".into())));
        let (api_url, env) = declared("api_url");
        assert_eq!(api_url.as_deref(), Some("http://127.0.0.1:9999/chat"));
        assert_eq!(env.as_deref(), Some("CHAT_API_URL"));
        assert_eq!(declared("max_agent_steps").0.as_deref(), Some("25"));
        assert_eq!(declared("request_timeout_secs").0, None);
    }

    #[test]
    fn credentials_come_from_the_environment() {
        for (id, var) in [
            ("groq_api_key", "GROQ_API_KEY"),
            ("openai_api_key", "OPENAI_API_KEY"),
            ("tavily_api_key", "TAVILY_API_KEY"),
        ] {
            assert_eq!(declared(id), (Some(String::new()), Some(var.to_string())));
        }
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "search-agent",
            "--server-addr",
            "0.0.0.0:8080",
            "--openai-base-url",
            "http://localhost:1234/v1",
            "--request-timeout-secs",
            "30",
        ]).unwrap();
        assert_eq!(args.server_addr, "0.0.0.0:8080");
        assert_eq!(args.openai_base_url.as_deref(), Some("http://localhost:1234/v1"));
        assert_eq!(args.request_timeout_secs, Some(30));
    }
}
