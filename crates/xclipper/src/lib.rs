//! XClipper - clip X posts into markdown notes
//!
//! This crate turns a post URL into a note for a personal vault:
//!
//! 1. [`extract_post_id`] validates the URL and pulls out the post id.
//! 2. A [`PostSource`] (by default [`XApiClient`]) retrieves the post and
//!    its author from the X API v2.
//! 3. [`render`] builds the filename and the markdown document, resolving
//!    wrapped links, mentions, and attached articles.
//!
//! [`Clipper`] runs the whole pipeline and writes the note through a
//! [`Vault`].

mod api;
mod clipper;
mod error;
mod filename;
pub mod markdown;
mod post_id;
mod types;
mod vault;

pub use api::{PostSource, XApiClient, EXPANSIONS, TWEET_FIELDS, USER_FIELDS};
pub use clipper::{ClipOptions, ClipResult, Clipper, ClipperBuilder};
pub use error::{ClipError, UNKNOWN_API_ERROR};
pub use filename::{derive_filename, sanitize, FALLBACK_FILENAME, TITLE_CHAR_LIMIT};
pub use markdown::{generate_markdown, is_link_only, render, render_at, RenderedNote};
pub use post_id::extract_post_id;
pub use types::{Article, Author, Entities, MentionSpan, NoteTweet, Post, UrlSpan};
pub use vault::{note_path, save_note, FsVault, SavedNote, Vault};

/// Default tweets endpoint
pub const DEFAULT_API_BASE: &str = "https://api.x.com/2/tweets";

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "XClipper/1.0";
