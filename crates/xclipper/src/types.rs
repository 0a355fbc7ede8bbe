//! Core types for XClipper
//!
//! Field names follow the X API v2 JSON payload so the types deserialize
//! straight from a tweet lookup response.

use serde::{Deserialize, Serialize};

/// A retrieved post merged with its author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post id, kept as an opaque token
    pub id: String,

    /// Standard (possibly truncated) body text
    #[serde(default)]
    pub text: String,

    /// Creation timestamp (RFC 3339)
    #[serde(default)]
    pub created_at: String,

    /// Id of the author, used to pick the author out of the expansions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,

    /// Long-form body overriding `text` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_tweet: Option<NoteTweet>,

    /// Attached long-form article
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,

    /// Entities of `text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,

    /// Author resolved from the response expansions
    #[serde(default)]
    pub author: Author,
}

impl Post {
    /// Text used for rendering and filename derivation
    ///
    /// Note-text wins over the standard body whenever it is non-empty.
    pub fn effective_content(&self) -> &str {
        match &self.note_tweet {
            Some(note) if !note.text.is_empty() => &note.text,
            _ => &self.text,
        }
    }

    /// URL spans used to resolve the effective content
    ///
    /// Spans of the note-text are preferred; the top-level spans are the
    /// fallback.
    pub fn content_urls(&self) -> &[UrlSpan] {
        let note_urls = self
            .note_tweet
            .as_ref()
            .filter(|note| !note.text.is_empty())
            .and_then(|note| note.entities.as_ref())
            .map(|e| e.urls.as_slice())
            .unwrap_or_default();
        if !note_urls.is_empty() {
            return note_urls;
        }
        self.entities
            .as_ref()
            .map(|e| e.urls.as_slice())
            .unwrap_or_default()
    }
}

/// Extended-length body of a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteTweet {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
}

/// Long-form article attached to a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
}

impl Article {
    /// Plain text if present, otherwise the preview text
    ///
    /// Returns `None` when the chosen text is empty.
    pub fn body(&self) -> Option<&str> {
        self.plain_text
            .as_deref()
            .or(self.preview_text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// Structured annotations anchored to substrings of a text
///
/// Offsets are informational; resolution matches the literal substrings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub urls: Vec<UrlSpan>,
    #[serde(default)]
    pub mentions: Vec<MentionSpan>,
}

/// A wrapped link inside a text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlSpan {
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub end: usize,
    /// Literal short URL as it appears in the text
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unwound_url: Option<String>,
}

impl UrlSpan {
    /// Create a span for `url` expanding to `expanded_url`, shown as `display_url`
    pub fn new(
        url: impl Into<String>,
        expanded_url: impl Into<String>,
        display_url: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            expanded_url: Some(expanded_url.into()),
            display_url: Some(display_url.into()),
            ..Default::default()
        }
    }

    /// Link target, falling back to the short URL
    pub fn target(&self) -> &str {
        self.expanded_url.as_deref().unwrap_or(&self.url)
    }

    /// Link text, falling back to the target
    pub fn display(&self) -> &str {
        self.display_url.as_deref().unwrap_or_else(|| self.target())
    }
}

/// A `@username` reference inside a text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentionSpan {
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub end: usize,
    pub username: String,
}

/// Author of a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Handle without the leading `@`
    #[serde(default)]
    pub username: String,
}
