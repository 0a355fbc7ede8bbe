//! Post identifier extraction
//!
//! Accepts `x.com` and `twitter.com` status URLs (with or without `www.`)
//! and returns the numeric post id as an opaque string.

use crate::error::ClipError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Hosts that serve X posts
const ACCEPTED_HOSTS: &[&str] = &["x.com", "twitter.com"];

static STATUS_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/[^/]+/status/(\d+)").expect("status path pattern is valid")
});

/// Extract the post id from an X status URL
///
/// The id is returned verbatim. It is never parsed as a number because ids
/// can exceed the precision of native integer types in some clients.
pub fn extract_post_id(url: &str) -> Result<String, ClipError> {
    let parsed = Url::parse(url).map_err(|_| ClipError::InvalidUrl(url.to_string()))?;

    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if !ACCEPTED_HOSTS.contains(&host) {
        return Err(ClipError::WrongDomain);
    }

    STATUS_PATH
        .captures(parsed.path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ClipError::IdNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_x_url() {
        assert_eq!(
            extract_post_id("https://x.com/jack/status/20").unwrap(),
            "20"
        );
    }

    #[test]
    fn test_extract_accepts_all_hosts() {
        for url in [
            "https://x.com/user/status/123",
            "https://www.x.com/user/status/123",
            "https://twitter.com/user/status/123",
            "https://www.twitter.com/user/status/123",
            "https://WWW.X.COM/user/status/123",
        ] {
            assert_eq!(extract_post_id(url).unwrap(), "123", "{url}");
        }
    }

    #[test]
    fn test_extract_keeps_large_ids_verbatim() {
        let id = extract_post_id("https://x.com/user/status/1876543210987654321987").unwrap();
        assert_eq!(id, "1876543210987654321987");
    }

    #[test]
    fn test_extract_ignores_query_and_suffix() {
        assert_eq!(
            extract_post_id("https://x.com/user/status/555?s=20&t=abc").unwrap(),
            "555"
        );
        assert_eq!(
            extract_post_id("https://x.com/user/status/555/photo/1").unwrap(),
            "555"
        );
    }

    #[test]
    fn test_extract_invalid_url() {
        assert!(matches!(
            extract_post_id("not a url"),
            Err(ClipError::InvalidUrl(_))
        ));
        assert!(matches!(
            extract_post_id("x.com/user/status/1"),
            Err(ClipError::InvalidUrl(_))
        ));
        assert!(matches!(extract_post_id(""), Err(ClipError::InvalidUrl(_))));
    }

    #[test]
    fn test_extract_wrong_domain() {
        for url in [
            "https://example.com/user/status/1",
            "https://mobile.x.com/user/status/1",
            "https://notx.com/user/status/1",
            "https://x.com.evil.org/user/status/1",
        ] {
            assert!(
                matches!(extract_post_id(url), Err(ClipError::WrongDomain)),
                "{url}"
            );
        }
    }

    #[test]
    fn test_extract_id_not_found() {
        for url in [
            "https://x.com/user",
            "https://x.com/user/status/",
            "https://x.com/user/status/abc",
            "https://x.com/status/123",
            "https://x.com/",
        ] {
            assert!(
                matches!(extract_post_id(url), Err(ClipError::IdNotFound)),
                "{url}"
            );
        }
    }
}
