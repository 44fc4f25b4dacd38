//! Markdown to sanitized, theme-styled HTML for agent responses.

use ammonia::Builder;
use linkify::{ LinkFinder, LinkKind };
use pulldown_cmark::{ html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream };
use std::collections::{ HashMap, HashSet };

pub const RESPONSE_FRAME_HEIGHT: u32 = 500;

const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "blockquote", "code", "em", "i", "li", "ol", "strong", "ul",
    "p", "pre", "h1", "h2", "h3", "br", "img",
];
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];
const LINK_REL: &str = "nofollow";

const CSS_DARK: &str = r#"
    body {
        font-family: 'Segoe UI', sans-serif;
        color: #f1f1f1;
        background-color: #0e1117;
        line-height: 1.6;
    }
    h1, h2 { color: #58a6ff; }
    code {
        background-color: #2b2b2b;
        padding: 2px 5px;
        border-radius: 4px;
        font-size: 0.95em;
        color: #ff7b72;
    }
    ul { padding-left: 20px; }
    a { color: #84d4ff; text-decoration: none; }
    img { max-width: 100%; height: auto; }
"#;

const CSS_LIGHT: &str = r#"
    body {
        font-family: 'Segoe UI', sans-serif;
        color: #222;
        background-color: #ffffff;
        line-height: 1.6;
    }
    h1, h2 { color: #195de6; }
    code {
        background-color: #f0f0f0;
        padding: 2px 5px;
        border-radius: 4px;
        font-size: 0.95em;
        color: #d6336c;
    }
    ul { padding-left: 20px; }
    a { color: #195de6; text-decoration: none; }
    img { max-width: 100%; height: auto; }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    /// Looks up a theme by its form label ("Dark" / "Light").
    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|theme| theme.as_str() == name)
    }

    pub fn css(&self) -> &'static str {
        match self {
            Theme::Dark => CSS_DARK,
            Theme::Light => CSS_LIGHT,
        }
    }
}

fn sanitizer() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .tag_attributes(
            HashMap::from([
                ("a", HashSet::from(["href", "title"])),
                ("img", HashSet::from(["src", "alt", "title"])),
            ])
        )
        .generic_attributes(HashSet::new())
        .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
        .link_rel(Some(LINK_REL));
    builder
}

// Raw HTML elements whose text is never linked.
const NO_LINK_HTML_TAGS: &[&str] = &["a", "code", "pre"];

fn push_linked<'a>(out: &mut Vec<Event<'a>>, text: &str, finder: &LinkFinder) {
    for span in finder.spans(text) {
        let literal = span.as_str();
        let is_link = span.kind() == Some(&LinkKind::Url) && !is_email_fragment(text, span.start(), literal);
        if !is_link {
            out.push(Event::Text(CowStr::from(literal.to_string())));
            continue;
        }
        let dest = if literal.contains("://") {
            literal.to_string()
        } else {
            format!("http://{}", literal)
        };
        out.push(
            Event::Start(Tag::Link {
                link_type: LinkType::Autolink,
                dest_url: CowStr::from(dest),
                title: CowStr::from(""),
                id: CowStr::from(""),
            })
        );
        out.push(Event::Text(CowStr::from(literal.to_string())));
        out.push(Event::End(TagEnd::Link));
    }
}

// Scheme-less matches can be the domain half of an e-mail address; those stay plain text.
fn is_email_fragment(text: &str, start: usize, literal: &str) -> bool {
    !literal.contains("://") && (literal.contains('@') || text[..start].ends_with('@'))
}

/// Net change in open `a`/`code`/`pre` elements across a raw HTML fragment.
fn raw_html_depth_change(fragment: &str) -> isize {
    let mut change = 0isize;
    let mut rest = fragment;
    while let Some(pos) = rest.find('<') {
        rest = &rest[pos + 1..];
        let closing = rest.starts_with('/');
        let name: String = rest
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if !NO_LINK_HTML_TAGS.contains(&name.as_str()) {
            continue;
        }
        let self_closing = rest
            .find('>')
            .map(|end| rest[..end].ends_with('/'))
            .unwrap_or(false);
        if closing {
            change -= 1;
        } else if !self_closing {
            change += 1;
        }
    }
    change
}

// Bare URLs in prose become links; code, links, raw HTML anchors and image alt text are left alone.
fn linkify_events<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]).url_must_have_scheme(false);
    let mut out = Vec::new();
    let mut skip_depth = 0usize;

    for event in events {
        match &event {
            Event::Start(Tag::CodeBlock(_) | Tag::Link { .. } | Tag::Image { .. }) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Link | TagEnd::Image) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Html(fragment) | Event::InlineHtml(fragment) => {
                skip_depth = skip_depth.saturating_add_signed(raw_html_depth_change(fragment));
            }
            Event::Text(text) if skip_depth == 0 => {
                push_linked(&mut out, text, &finder);
                continue;
            }
            _ => {}
        }
        out.push(event);
    }
    out
}

pub fn markdown_to_html(md_text: &str) -> String {
    let parser = TextMergeStream::new(Parser::new_ext(md_text, Options::empty()));
    let events = linkify_events(parser);
    let mut raw_html = String::new();
    html::push_html(&mut raw_html, events.into_iter());
    sanitizer().clean(&raw_html).to_string()
}

/// A standalone document: theme stylesheet plus the sanitized response body.
pub fn render_rich_html(md_text: &str, theme: Theme) -> String {
    format!("<style>{}</style><body>{}</body>", theme.css(), markdown_to_html(md_text))
}
