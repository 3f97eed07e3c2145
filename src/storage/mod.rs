//! Storage abstractions for bookmark persistence.
//!
//! Bookmarks live in a single named slot holding a JSON list of contest IDs:
//!
//! ```text
//! storage/
//! ├── config.toml                    # Application configuration
//! └── contest-hive-bookmarks.json    # ["cf-2050", "lc-weekly-contest-431"]
//! ```
//!
//! The slot is read once at startup and rewritten after every change.
//! Unparseable content is treated as an empty list and the slot is reset.

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::BookmarkSet;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Trait for bookmark storage backends.
#[async_trait]
pub trait BookmarkStorage: Send + Sync {
    /// Load the bookmark set.
    ///
    /// A missing slot yields an empty set. A corrupt slot is reset to `[]`
    /// and also yields an empty set.
    async fn load_bookmarks(&self) -> Result<BookmarkSet>;

    /// Replace the stored bookmark set.
    async fn save_bookmarks(&self, bookmarks: &BookmarkSet) -> Result<()>;
}
