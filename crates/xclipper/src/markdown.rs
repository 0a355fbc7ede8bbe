//! Markdown document rendering
//!
//! Turns a [`Post`] into a note: YAML front matter, the post text with its
//! wrapped links resolved, and the attached article (if any).

use crate::filename::derive_filename;
use crate::types::{Article, Post, UrlSpan};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Category every clipped note is filed under
pub const CLIPPINGS_CATEGORY: &str = "Clippings";

/// Heading placed above the article text
pub const ARTICLE_HEADING: &str = "### X Article";

/// Profile URL prefix for article mentions
const PROFILE_URL: &str = "https://x.com/@";

/// Marker of the platform's internal article viewer links
const ARTICLE_VIEWER: &str = "x.com/i/article/";

static LINK_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://t\.co/\S+$").expect("short link pattern is valid")
});

/// A rendered note ready to be written to the vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedNote {
    /// Sanitized filename without extension
    pub filename: String,
    /// Markdown document
    pub body: String,
}

/// Render a post using today's (UTC) date as the `created` value
pub fn render(post: &Post) -> RenderedNote {
    render_at(post, Utc::now().date_naive())
}

/// Render a post with an explicit `created` date
pub fn render_at(post: &Post, today: NaiveDate) -> RenderedNote {
    let content = post.effective_content();
    let filename_text = if is_link_only(content) {
        None
    } else {
        Some(display_text(content, post))
    };

    let filename = derive_filename(
        &post.author.name,
        filename_text.as_deref(),
        post.article.as_ref().map(|a| a.title.as_str()),
    );

    RenderedNote {
        filename,
        body: generate_markdown(post, today),
    }
}

/// True when the trimmed text is a single `t.co` short link and nothing else
pub fn is_link_only(text: &str) -> bool {
    LINK_ONLY.is_match(text.trim())
}

/// Build the markdown document for a post
pub fn generate_markdown(post: &Post, today: NaiveDate) -> String {
    let published = format_date(&post.created_at);
    let created = today.format("%Y-%m-%d").to_string();

    let mut content = post.effective_content();
    if post.article.is_some() && is_link_only(content) {
        content = "";
    }
    let resolved = if content.is_empty() {
        String::new()
    } else {
        resolve_urls(content, post)
    };

    let mut md = format!(
        "---\ncategories:\n  - \"[[{}]]\"\nauthor:\n  - \"[[{}]]\"\ncreated: {}\npublished: {}\n---\n",
        CLIPPINGS_CATEGORY, post.author.name, created, published
    );

    md.push_str(&resolved);

    if let Some(article_text) = post.article.as_ref().and_then(format_article) {
        md.push_str(&format!("\n{}\n\n{}\n", ARTICLE_HEADING, article_text));
    }

    md
}

/// Replace each wrapped link with `[display](expanded)`
///
/// Only the first occurrence of each short link is replaced. Links back to
/// the post itself and article viewer links are left as-is.
pub fn resolve_urls(text: &str, post: &Post) -> String {
    substitute_links(text, post, |span| {
        format!("[{}]({})", span.display(), span.target())
    })
}

/// Replace each wrapped link with its display form
///
/// Used for filenames, where a markdown link would be mangled by
/// sanitizing. Follows the same skip rules as [`resolve_urls`].
pub fn display_text(text: &str, post: &Post) -> String {
    substitute_links(text, post, |span| span.display().to_string())
}

fn substitute_links(
    text: &str,
    post: &Post,
    replacement: impl Fn(&UrlSpan) -> String,
) -> String {
    let mut resolved = text.to_string();
    for span in post.content_urls() {
        if span.url.is_empty() || is_wrapper_link(span.target(), &post.id) {
            continue;
        }
        resolved = resolved.replacen(&span.url, &replacement(span), 1);
    }
    resolved
}

/// Links that the platform adds around a post rather than links the author wrote
fn is_wrapper_link(expanded: &str, post_id: &str) -> bool {
    (expanded.contains("/status/") && expanded.contains(post_id))
        || expanded.contains(ARTICLE_VIEWER)
}

/// Article text with paragraphs split and entities linked
///
/// Returns `None` for an article without any text.
fn format_article(article: &Article) -> Option<String> {
    let text = article.body()?;
    let mut resolved = text.replace('\n', "\n\n");

    let Some(entities) = article.entities.as_ref() else {
        return Some(resolved);
    };

    for mention in &entities.mentions {
        let handle = format!("@{}", mention.username);
        let link = format!("[{}]({}{})", handle, PROFILE_URL, mention.username);
        resolved = resolved.replacen(&handle, &link, 1);
    }

    for span in entities.urls.iter().filter(|u| !u.url.is_empty()) {
        let url = span.url.as_str();
        let link = if url.starts_with("http") {
            let display = url
                .strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .unwrap_or(url);
            format!("[{}]({})", display, url)
        } else {
            format!("[{}](https://{})", url, url)
        };
        resolved = resolved.replacen(url, &link, 1);
    }

    Some(resolved)
}

/// Date part (`YYYY-MM-DD`, UTC) of an RFC 3339 timestamp
///
/// Unparseable input keeps whatever precedes the `T` separator.
fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        Err(_) => timestamp.split('T').next().unwrap_or_default().to_string(),
    }
}
