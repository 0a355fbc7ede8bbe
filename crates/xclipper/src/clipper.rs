//! Clip orchestration
//!
//! This module provides the main entry points for clipping a post:
//! URL → post id → [`Post`] → rendered note → vault.
//! Each call is independent; nothing is cached between clips.

use crate::api::{PostSource, XApiClient};
use crate::error::ClipError;
use crate::markdown::{render, RenderedNote};
use crate::post_id::extract_post_id;
use crate::types::Post;
use crate::vault::{save_note, FsVault, Vault};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Clip options supplied by the host
#[derive(Debug, Clone, Default)]
pub struct ClipOptions {
    /// X API bearer token
    pub bearer_token: String,
    /// Folder inside the vault; empty means the vault root
    pub save_path: String,
    /// Custom tweets endpoint
    pub api_base: Option<String>,
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

/// Outcome of a clip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipResult {
    /// Post id taken from the URL
    pub post_id: String,
    /// Final filename (without extension)
    pub filename: String,
    /// Vault-relative path; `None` for previews
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Markdown document
    pub body: String,
}

/// Clips posts into a vault
pub struct Clipper {
    source: Box<dyn PostSource>,
    vault: Box<dyn Vault>,
    bearer_token: String,
    save_path: String,
}

impl Clipper {
    /// Create a builder
    pub fn builder() -> ClipperBuilder {
        ClipperBuilder::default()
    }

    /// Fetch and render a post, then save it to the vault
    pub async fn clip(&self, url: &str) -> Result<ClipResult, ClipError> {
        let (post_id, post) = self.retrieve(url).await?;
        let RenderedNote { filename, body } = render(&post);

        let saved = save_note(
            self.vault.as_ref(),
            &self.save_path,
            &filename,
            &post_id,
            &body,
        )
        .await?;

        Ok(ClipResult {
            post_id,
            filename: saved.filename,
            path: Some(saved.path),
            body,
        })
    }

    /// Fetch and render a post without saving it
    pub async fn preview(&self, url: &str) -> Result<ClipResult, ClipError> {
        let (post_id, post) = self.retrieve(url).await?;
        let RenderedNote { filename, body } = render(&post);

        Ok(ClipResult {
            post_id,
            filename,
            path: None,
            body,
        })
    }

    async fn retrieve(&self, url: &str) -> Result<(String, Post), ClipError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ClipError::InvalidUrl(String::new()));
        }

        let post_id = extract_post_id(url)?;

        if self.bearer_token.trim().is_empty() {
            return Err(ClipError::MissingCredential);
        }

        tracing::debug!(source = self.source.name(), post_id = %post_id, "Clipping post");
        let post = self.source.fetch_post(&post_id, &self.bearer_token).await?;
        Ok((post_id, post))
    }
}

/// Builder for configuring a [`Clipper`]
#[derive(Default)]
pub struct ClipperBuilder {
    options: ClipOptions,
    source: Option<Box<dyn PostSource>>,
    vault: Option<Box<dyn Vault>>,
    vault_root: Option<PathBuf>,
}

impl ClipperBuilder {
    /// Start from a full set of options
    pub fn options(mut self, options: ClipOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.options.bearer_token = token.into();
        self
    }

    /// Set the folder notes are saved in
    pub fn save_path(mut self, path: impl Into<String>) -> Self {
        self.options.save_path = path.into();
        self
    }

    /// Set a custom tweets endpoint
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.options.api_base = Some(base.into());
        self
    }

    /// Set a custom User-Agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = Some(user_agent.into());
        self
    }

    /// Set a request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Use a custom post source instead of the X API client
    pub fn source(mut self, source: Box<dyn PostSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Use a custom vault
    pub fn vault(mut self, vault: Box<dyn Vault>) -> Self {
        self.vault = Some(vault);
        self
    }

    /// Save into a directory on disk
    pub fn vault_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.vault_root = Some(root.into());
        self
    }

    /// Build the clipper
    pub fn build(self) -> Clipper {
        let ClipperBuilder {
            options,
            source,
            vault,
            vault_root,
        } = self;

        let source = source.unwrap_or_else(|| {
            let mut client = XApiClient::new();
            if let Some(base) = options.api_base {
                client = client.with_base_url(base);
            }
            if let Some(user_agent) = options.user_agent {
                client = client.with_user_agent(user_agent);
            }
            if let Some(timeout) = options.timeout {
                client = client.with_timeout(timeout);
            }
            Box::new(client) as Box<dyn PostSource>
        });

        let vault = vault.unwrap_or_else(|| {
            let root = vault_root.unwrap_or_else(|| PathBuf::from("."));
            Box::new(FsVault::new(root)) as Box<dyn Vault>
        });

        Clipper {
            source,
            vault,
            bearer_token: options.bearer_token,
            save_path: options.save_path,
        }
    }
}
