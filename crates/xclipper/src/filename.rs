//! Note filename derivation

/// Characters stripped from filenames
const UNSAFE_CHARS: &[char] = &[
    '/', '\\', ':', '*', '?', '"', '<', '>', '|', '#', '^', '[', ']',
];

/// Maximum number of content characters used in a filename
pub const TITLE_CHAR_LIMIT: usize = 100;

/// Fallback used when sanitizing leaves nothing
pub const FALLBACK_FILENAME: &str = "New X Post";

/// Derive a note filename (without extension)
///
/// Prefers the first [`TITLE_CHAR_LIMIT`] characters of the trimmed post
/// text, then the article title, then a generic `New Post` suffix.
pub fn derive_filename(
    author_name: &str,
    text: Option<&str>,
    article_title: Option<&str>,
) -> String {
    let author = sanitize(author_name);

    if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
        let preview: String = text.chars().take(TITLE_CHAR_LIMIT).collect();
        return sanitize(&format!("{} on X - {}", author, preview));
    }

    if let Some(title) = article_title.filter(|t| !t.trim().is_empty()) {
        return sanitize(&format!("{} on X - {}", author, title));
    }

    sanitize(&format!("{} on X - New Post", author))
}

/// Strip unsafe characters and collapse whitespace
///
/// Returns [`FALLBACK_FILENAME`] when nothing is left.
pub fn sanitize(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| !UNSAFE_CHARS.contains(c)).collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        collapsed
    }
}
