//! In-memory storage backend for tests and throwaway sessions.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::BookmarkSet;
use crate::storage::BookmarkStorage;

/// Keeps the bookmark set in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    bookmarks: Mutex<BookmarkSet>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new(initial: BookmarkSet) -> Self {
        Self {
            bookmarks: Mutex::new(initial),
            writes: Mutex::new(0),
        }
    }

    /// Number of times the set has been saved.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BookmarkStorage for MemoryStorage {
    async fn load_bookmarks(&self) -> Result<BookmarkSet> {
        Ok(self
            .bookmarks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn save_bookmarks(&self, bookmarks: &BookmarkSet) -> Result<()> {
        *self.bookmarks.lock().unwrap_or_else(|e| e.into_inner()) = bookmarks.clone();
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
