//! Local filesystem storage implementation.
//!
//! Keeps the bookmark slot as a JSON file under a storage directory.
//! Writes go to a temporary file first and are renamed into place, so a
//! crash mid-write never leaves a truncated slot behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::BookmarkSet;
use crate::storage::BookmarkStorage;

/// Default slot name for bookmarks.
pub const BOOKMARKS_KEY: &str = "contest-hive-bookmarks.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    bookmarks_key: String,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_bookmarks_key(root_dir, BOOKMARKS_KEY)
    }

    /// Create a LocalStorage with a custom bookmark slot name.
    pub fn with_bookmarks_key(root_dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            bookmarks_key: key.into(),
        }
    }

    /// Full path of the bookmark slot.
    pub fn bookmarks_path(&self) -> PathBuf {
        self.path(&self.bookmarks_key)
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl BookmarkStorage for LocalStorage {
    async fn load_bookmarks(&self) -> Result<BookmarkSet> {
        let Some(bytes) = self.read_bytes(&self.bookmarks_key).await? else {
            log::debug!("No bookmark slot at {}", self.bookmarks_path().display());
            return Ok(BookmarkSet::new());
        };

        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(ids) => Ok(BookmarkSet::from_ids(ids)),
            Err(e) => {
                log::error!("Error parsing bookmarks: {}. Resetting slot.", e);
                self.save_bookmarks(&BookmarkSet::new()).await?;
                Ok(BookmarkSet::new())
            }
        }
    }

    async fn save_bookmarks(&self, bookmarks: &BookmarkSet) -> Result<()> {
        let bytes = serde_json::to_vec(bookmarks)?;
        self.write_bytes(&self.bookmarks_key, &bytes).await
    }
}
