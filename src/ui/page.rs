use ammonia::clean_text;
use serde_json::json;

use super::render::{ Theme, RESPONSE_FRAME_HEIGHT };
use crate::config::models::ui_models;
use crate::llm::ModelProvider;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Everything the form page needs to redraw itself after a submit.
#[derive(Debug, Clone)]
pub struct PageView {
    pub system_prompt: String,
    pub theme: Theme,
    pub provider: ModelProvider,
    pub model: Option<String>,
    pub allow_search: bool,
    pub query: String,
    pub notice: Option<Notice>,
    /// Full styled document for the response frame.
    pub response_html: Option<String>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            system_prompt: String::new(),
            theme: Theme::Dark,
            provider: ModelProvider::Groq,
            model: None,
            allow_search: false,
            query: String::new(),
            notice: None,
            response_html: None,
        }
    }
}

const PAGE_CSS: &str = r#"
    body { font-family: 'Segoe UI', sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
    label { display: block; margin-top: 1rem; font-weight: 600; }
    textarea, select { width: 100%; box-sizing: border-box; font: inherit; }
    .inline label { display: inline; font-weight: normal; margin-right: 1rem; }
    .notice { margin-top: 1rem; padding: 0.75rem 1rem; border-radius: 6px; }
    .notice.warning { background: #fff4ce; color: #5c4400; }
    .notice.error { background: #fde7e9; color: #8a1c24; }
    iframe { width: 100%; border: 1px solid #ccc; border-radius: 6px; }
    button { margin-top: 1rem; padding: 0.5rem 1.25rem; font: inherit; }
"#;

fn radio_group(name: &str, options: &[&str], selected: &str) -> String {
    options
        .iter()
        .map(|opt| {
            let checked = if *opt == selected { " checked" } else { "" };
            format!(
                "<label><input type=\"radio\" name=\"{name}\" value=\"{value}\"{checked}> {value}</label>",
                name = name,
                value = clean_text(opt),
                checked = checked
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn model_options(provider: ModelProvider, selected: Option<&str>) -> String {
    let models = ui_models(provider);
    let selected = selected.filter(|m| models.contains(m)).or(models.first().copied());
    models
        .iter()
        .map(|model| {
            let attr = if Some(*model) == selected { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>", clean_text(model), attr)
        })
        .collect::<Vec<_>>()
        .join("")
}

fn catalog_json() -> String {
    let mut catalog = serde_json::Map::new();
    for provider in ModelProvider::ALL {
        catalog.insert(provider.as_str().to_string(), json!(ui_models(provider)));
    }
    serde_json::Value::Object(catalog).to_string()
}

fn notice_html(notice: &Notice) -> String {
    let class = match notice.kind {
        NoticeKind::Warning => "warning",
        NoticeKind::Error => "error",
    };
    format!("<div class=\"notice {}\">{}</div>", class, clean_text(&notice.message))
}

fn response_frame(document: &str) -> String {
    format!(
        "<h3>Agent Response</h3>\n<iframe sandbox=\"\" scrolling=\"yes\" height=\"{}\" srcdoc=\"{}\"></iframe>",
        RESPONSE_FRAME_HEIGHT,
        clean_text(document)
    )
}

pub fn render_page(view: &PageView) -> String {
    let theme_names: Vec<&str> = Theme::ALL.iter().map(Theme::as_str).collect();
    let provider_names: Vec<&str> = ModelProvider::ALL.iter().map(ModelProvider::as_str).collect();
    let search_checked = if view.allow_search { " checked" } else { "" };
    let notice = view.notice.as_ref().map(notice_html).unwrap_or_default();
    let response = view.response_html.as_deref().map(response_frame).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Search Agent</title>
<style>{page_css}</style>
</head>
<body>
<h1>AI Search Assistant</h1>
<p>Chat with your AI agent and receive clean, styled responses.</p>
<form method="post" action="/">
<div class="inline"><strong>Choose Theme:</strong>
{themes}
</div>
<label for="system_prompt">Define your AI Agent:</label>
<textarea id="system_prompt" name="system_prompt" rows="3" placeholder="Type your system prompt here...">{system_prompt}</textarea>
<div class="inline"><strong>Select Provider:</strong>
{providers}
</div>
<label for="model">Select Model:</label>
<select id="model" name="model">{models}</select>
<label><input type="checkbox" name="allow_search" value="true"{search_checked}> Allow Web Search</label>
<label for="query">Enter your Query:</label>
<textarea id="query" name="query" rows="6" placeholder="Ask Anything!">{query}</textarea>
<button type="submit">Ask Agent!</button>
</form>
{notice}
{response}
<script>
const catalog = {catalog};
document.querySelectorAll('input[name="provider"]').forEach((radio) => {{
  radio.addEventListener('change', () => {{
    const select = document.getElementById('model');
    select.innerHTML = '';
    (catalog[radio.value] || []).forEach((name) => select.add(new Option(name, name)));
  }});
}});
</script>
</body>
</html>
"#,
        page_css = PAGE_CSS,
        themes = radio_group("theme", &theme_names, view.theme.as_str()),
        system_prompt = clean_text(&view.system_prompt),
        providers = radio_group("provider", &provider_names, view.provider.as_str()),
        models = model_options(view.provider, view.model.as_deref()),
        search_checked = search_checked,
        query = clean_text(&view.query),
        notice = notice,
        response = response,
        catalog = catalog_json(),
    )
}
