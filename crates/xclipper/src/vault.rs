//! Note storage
//!
//! Design: [`Vault`] is the storage collaborator. Paths are vault-relative
//! and `/`-separated, so a host can back the trait with anything that
//! understands folders and files. [`FsVault`] maps them onto a directory.

use crate::error::ClipError;
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Extension given to every note
pub const NOTE_EXTENSION: &str = "md";

/// Storage collaborator for clipped notes
#[async_trait]
pub trait Vault: Send + Sync {
    /// Returns true if a file or folder exists at the vault-relative path
    async fn exists(&self, path: &str) -> io::Result<bool>;

    /// Create a folder (and any missing parents)
    async fn create_folder(&self, path: &str) -> io::Result<()>;

    /// Create a new file; fails if one already exists
    async fn create(&self, path: &str, contents: &str) -> io::Result<()>;
}

/// Vault backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Create a vault rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Vault root directory
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

#[async_trait]
impl Vault for FsVault {
    async fn exists(&self, path: &str) -> io::Result<bool> {
        fs::try_exists(self.resolve(path)).await
    }

    async fn create_folder(&self, path: &str) -> io::Result<()> {
        fs::create_dir_all(self.resolve(path)).await
    }

    async fn create(&self, path: &str, contents: &str) -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(path))
            .await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await
    }
}

/// Where a note ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedNote {
    /// Final filename (without extension)
    pub filename: String,
    /// Vault-relative path of the written file
    pub path: String,
}

/// Vault-relative path of a note: `<folder>/<name>.md`, or `<name>.md` at the root
pub fn note_path(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        format!("{}.{}", name, NOTE_EXTENSION)
    } else {
        format!("{}/{}.{}", folder, name, NOTE_EXTENSION)
    }
}

/// Write a note, creating the folder first when needed
///
/// When `<folder>/<filename>.md` is taken the post id is appended:
/// `<filename> <post_id>.md`.
pub async fn save_note(
    vault: &dyn Vault,
    folder: &str,
    filename: &str,
    post_id: &str,
    body: &str,
) -> Result<SavedNote, ClipError> {
    let folder = folder.trim();

    if !folder.is_empty() && !vault.exists(folder).await? {
        tracing::debug!(folder, "Creating folder");
        vault.create_folder(folder).await?;
    }

    let mut filename = filename.to_string();
    let mut path = note_path(folder, &filename);
    if vault.exists(&path).await? {
        filename = format!("{} {}", filename, post_id);
        path = note_path(folder, &filename);
    }

    vault.create(&path, body).await?;
    tracing::debug!(path = %path, "Note written");

    Ok(SavedNote { filename, path })
}
