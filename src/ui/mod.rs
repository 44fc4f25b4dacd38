pub mod client;
pub mod page;
pub mod render;

use axum::{ extract::State, response::Html, routing::get, Form, Router };
use log::{ info, warn };
use serde::Deserialize;

use self::client::AskOutcome;
use self::page::{ render_page, Notice, NoticeKind, PageView, DEFAULT_SYSTEM_PROMPT };
use self::render::{ render_rich_html, Theme };
use crate::llm::ModelProvider;
use crate::models::chat::ChatRequest;
use crate::server::api::AppState;

pub const EMPTY_QUERY_WARNING: &str = "Please enter a query before asking the agent.";

#[derive(Deserialize, Debug, Default)]
pub struct AskForm {
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub allow_search: Option<String>,
    #[serde(default)]
    pub query: String,
}

impl AskForm {
    // Unknown radio values fall back to the default selection.
    fn theme(&self) -> Theme {
        Theme::from_name(&self.theme).unwrap_or_else(|| {
            if !self.theme.is_empty() {
                warn!("Unknown theme {:?}, using {}", self.theme, Theme::default().as_str());
            }
            Theme::default()
        })
    }

    fn provider(&self) -> ModelProvider {
        self.provider.parse().unwrap_or_else(|e| {
            if !self.provider.is_empty() {
                warn!("{}, using {}", e, ModelProvider::Groq);
            }
            ModelProvider::Groq
        })
    }

    fn allow_search(&self) -> bool {
        self.allow_search.is_some()
    }

    pub fn to_request(&self) -> ChatRequest {
        let system_prompt = if self.system_prompt.is_empty() {
            DEFAULT_SYSTEM_PROMPT.to_string()
        } else {
            self.system_prompt.clone()
        };
        ChatRequest {
            model_name: self.model.clone(),
            model_provider: self.provider().to_string(),
            system_prompt,
            messages: vec![self.query.clone()],
            allow_search: self.allow_search(),
        }
    }

    fn view(&self) -> PageView {
        PageView {
            system_prompt: self.system_prompt.clone(),
            theme: self.theme(),
            provider: self.provider(),
            model: Some(self.model.clone()).filter(|m| !m.is_empty()),
            allow_search: self.allow_search(),
            query: self.query.clone(),
            notice: None,
            response_html: None,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler).post(ask_handler))
}

async fn index_handler() -> Html<String> {
    Html(render_page(&PageView::default()))
}

async fn ask_handler(State(state): State<AppState>, Form(form): Form<AskForm>) -> Html<String> {
    let mut view = form.view();

    if form.query.trim().is_empty() {
        view.notice = Some(Notice { kind: NoticeKind::Warning, message: EMPTY_QUERY_WARNING.to_string() });
        return Html(render_page(&view));
    }

    let payload = form.to_request();
    match state.chat_api.ask(&payload).await {
        AskOutcome::Answer(text) => {
            info!("UI rendering {} bytes of agent response", text.len());
            view.response_html = Some(render_rich_html(&text, form.theme()));
        }
        AskOutcome::ApiError(message) | AskOutcome::RequestFailed(message) => {
            warn!("UI showing error: {}", message);
            view.notice = Some(Notice { kind: NoticeKind::Error, message });
        }
    }
    Html(render_page(&view))
}
