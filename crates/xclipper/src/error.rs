//! Error types for XClipper

use thiserror::Error;

/// Placeholder used when the API reports no data and no error message
pub const UNKNOWN_API_ERROR: &str = "Unknown error";

/// Errors that can occur while clipping a post
#[derive(Debug, Error)]
pub enum ClipError {
    /// Input is not a well-formed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// URL host is not x.com or twitter.com
    #[error("Not a valid X URL. Please provide an x.com link.")]
    WrongDomain,

    /// URL path has no `/<handle>/status/<digits>` segment
    #[error("Could not extract post ID from URL.")]
    IdNotFound,

    /// No bearer token was supplied
    #[error("Missing bearer token. Set your X API bearer token before clipping.")]
    MissingCredential,

    /// API rejected the credential (401 or 403)
    #[error("Authentication failed ({0}). Check your Bearer Token in settings.")]
    AuthenticationFailed(u16),

    /// API returned 404 for the post id
    #[error("Post not found: {0}")]
    PostNotFound(String),

    /// API returned 429
    #[error("Rate limited by X API. Try again later.")]
    RateLimited,

    /// Any other non-2xx status
    #[error("X API error: {0}")]
    ApiError(u16),

    /// 2xx response without a `data` object
    #[error("X API returned no data: {0}")]
    NoData(String),

    /// 2xx response whose expansions carry no author
    #[error("Could not resolve post author.")]
    AuthorUnresolved,

    /// 2xx response body that is not the expected JSON
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Vault could not create the folder or note
    #[error("Failed to save note: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClipError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClipError::Timeout
        } else if err.is_connect() {
            ClipError::ConnectError(err)
        } else {
            ClipError::RequestError(err.to_string())
        }
    }

    /// True for failures raised while reading the post URL
    pub fn is_url_error(&self) -> bool {
        matches!(
            self,
            ClipError::InvalidUrl(_) | ClipError::WrongDomain | ClipError::IdNotFound
        )
    }
}
