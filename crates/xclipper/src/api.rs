//! X API post retrieval
//!
//! Design: [`PostSource`] is the seam between the clipper and the remote
//! API. [`XApiClient`] is the HTTP implementation: one authenticated GET per
//! call, status codes mapped onto [`ClipError`] variants, no retries.

use crate::error::{ClipError, UNKNOWN_API_ERROR};
use crate::types::{Author, Post};
use crate::{DEFAULT_API_BASE, DEFAULT_USER_AGENT};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Tweet fields requested for every lookup
pub const TWEET_FIELDS: &str = "created_at,note_tweet,entities,attachments,article";

/// Expansions requested for every lookup
pub const EXPANSIONS: &str = "author_id,attachments.media_keys";

/// User fields requested for the expanded author
pub const USER_FIELDS: &str = "name,username";

/// Source of posts
///
/// Implement this trait to plug a different backend into the
/// [`Clipper`](crate::Clipper), e.g. a fixture source in tests.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Unique identifier for this source (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Retrieve a post and its author
    async fn fetch_post(&self, id: &str, credential: &str) -> Result<Post, ClipError>;
}

/// Tweet lookup response envelope
#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Option<Post>,
    #[serde(default)]
    includes: Option<Includes>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<Author>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the X API v2 tweet lookup endpoint
#[derive(Debug, Clone)]
pub struct XApiClient {
    base_url: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Default for XApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl XApiClient {
    /// Create a client for the public X API
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    /// Use a different tweets endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom User-Agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a request timeout. Without one the transport default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Tweets endpoint in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the lookup URL for a post id
    fn lookup_url(&self, id: &str) -> Result<Url, ClipError> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, id))
            .map_err(|e| ClipError::RequestError(format!("Invalid API URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("tweet.fields", TWEET_FIELDS)
            .append_pair("expansions", EXPANSIONS)
            .append_pair("user.fields", USER_FIELDS);
        Ok(url)
    }

    fn build_client(&self) -> Result<reqwest::Client, ClipError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        builder.build().map_err(ClipError::ClientBuildError)
    }
}

#[async_trait]
impl PostSource for XApiClient {
    fn name(&self) -> &'static str {
        "x_api"
    }

    async fn fetch_post(&self, id: &str, credential: &str) -> Result<Post, ClipError> {
        let url = self.lookup_url(id)?;
        let client = self.build_client()?;

        tracing::debug!(post_id = id, url = %url, "Fetching post");

        let response = client
            .get(url)
            .bearer_auth(credential)
            .header(
                USER_AGENT,
                HeaderValue::from_str(&self.user_agent)
                    .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
            )
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(ClipError::from_reqwest)?;

        let status = response.status();
        tracing::debug!(post_id = id, status = status.as_u16(), "X API responded");
        check_status(status, id)?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| ClipError::InvalidResponse(e.to_string()))?;

        assemble_post(body)
    }
}

/// Map a non-success status onto its failure kind
fn check_status(status: StatusCode, id: &str) -> Result<(), ClipError> {
    match status.as_u16() {
        200..=299 => Ok(()),
        code @ (401 | 403) => Err(ClipError::AuthenticationFailed(code)),
        404 => Err(ClipError::PostNotFound(id.to_string())),
        429 => Err(ClipError::RateLimited),
        code => Err(ClipError::ApiError(code)),
    }
}

/// Merge the primary data object with its expanded author
fn assemble_post(body: ApiResponse) -> Result<Post, ClipError> {
    let Some(mut post) = body.data else {
        let message = body
            .errors
            .into_iter()
            .next()
            .and_then(|e| e.message)
            .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());
        return Err(ClipError::NoData(message));
    };

    let mut users = body.includes.map(|i| i.users).unwrap_or_default();
    let position = post
        .author_id
        .as_deref()
        .and_then(|author_id| users.iter().position(|u| u.id == author_id))
        .unwrap_or(0);
    if position >= users.len() {
        return Err(ClipError::AuthorUnresolved);
    }

    post.author = users.swap_remove(position);
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ApiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_lookup_url_query() {
        let client = XApiClient::new().with_base_url("https://api.example.com/2/tweets/");
        let url = client.lookup_url("123").unwrap();
        assert_eq!(url.path(), "/2/tweets/123");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("tweet.fields".to_string(), TWEET_FIELDS.to_string()),
                ("expansions".to_string(), EXPANSIONS.to_string()),
                ("user.fields".to_string(), USER_FIELDS.to_string()),
            ]
        );
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(XApiClient::new().base_url(), "https://api.x.com/2/tweets");
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK, "1").is_ok());
        assert!(matches!(
            check_status(StatusCode::UNAUTHORIZED, "1"),
            Err(ClipError::AuthenticationFailed(401))
        ));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN, "1"),
            Err(ClipError::AuthenticationFailed(403))
        ));
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, "77"),
            Err(ClipError::PostNotFound(id)) if id == "77"
        ));
        assert!(matches!(
            check_status(StatusCode::TOO_MANY_REQUESTS, "1"),
            Err(ClipError::RateLimited)
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY, "1"),
            Err(ClipError::ApiError(502))
        ));
        assert!(matches!(
            check_status(StatusCode::MOVED_PERMANENTLY, "1"),
            Err(ClipError::ApiError(301))
        ));
    }

    #[test]
    fn test_assemble_no_data_uses_first_error() {
        let body = parse(
            r#"{"errors": [
                {"title": "Not Found Error", "message": "Could not find tweet with id: [1]."},
                {"message": "second"}
            ]}"#,
        );
        assert!(matches!(
            assemble_post(body),
            Err(ClipError::NoData(msg)) if msg == "Could not find tweet with id: [1]."
        ));
    }

    #[test]
    fn test_assemble_no_data_placeholder() {
        assert!(matches!(
            assemble_post(parse("{}")),
            Err(ClipError::NoData(msg)) if msg == UNKNOWN_API_ERROR
        ));
    }

    #[test]
    fn test_assemble_without_author() {
        let body = parse(r#"{"data": {"id": "1", "text": "hi", "created_at": "2024-01-01T00:00:00Z"}}"#);
        assert!(matches!(assemble_post(body), Err(ClipError::AuthorUnresolved)));

        let body = parse(
            r#"{"data": {"id": "1", "text": "hi"}, "includes": {"users": []}}"#,
        );
        assert!(matches!(assemble_post(body), Err(ClipError::AuthorUnresolved)));
    }

    #[test]
    fn test_assemble_matches_author_id() {
        let body = parse(
            r#"{
                "data": {"id": "1", "text": "hi", "author_id": "2"},
                "includes": {"users": [
                    {"id": "9", "name": "Quoted", "username": "quoted"},
                    {"id": "2", "name": "Ada", "username": "ada"}
                ]}
            }"#,
        );
        let post = assemble_post(body).unwrap();
        assert_eq!(post.author.name, "Ada");
        assert_eq!(post.author.username, "ada");
    }

    #[test]
    fn test_assemble_falls_back_to_first_user() {
        let body = parse(
            r#"{
                "data": {"id": "1", "text": "hi"},
                "includes": {"users": [{"id": "9", "name": "Grace", "username": "grace"}]}
            }"#,
        );
        assert_eq!(assemble_post(body).unwrap().author.name, "Grace");
    }
}
